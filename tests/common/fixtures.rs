//! Fake bundler scripts (POSIX sh) reproducing Vite's `dist/public` layout.

/// a.js, assets/b.css and index.html under dist/public
pub const VITE_BUILD: &str = "mkdir -p dist/public/assets \
    && printf 'export {}' > dist/public/a.js \
    && printf 'body{}' > dist/public/assets/b.css \
    && printf '<!doctype html>' > dist/public/index.html";

/// Same as `VITE_BUILD` but refuses to run if `dist` survived the clean step
pub const VITE_BUILD_REQUIRES_CLEAN: &str = "[ ! -e dist ] || { echo 'dist was not cleaned' >&2; exit 3; }; \
    mkdir -p dist/public/assets \
    && printf 'export {}' > dist/public/a.js \
    && printf 'body{}' > dist/public/assets/b.css \
    && printf '<!doctype html>' > dist/public/index.html";

/// Writes partial output, then fails like a Vite syntax error
pub const FAILING_BUILD: &str = "mkdir -p dist/public \
    && printf '<!doctype html>' > dist/public/index.html \
    && echo 'syntax error' >&2 && exit 2";

/// Output written straight to the root, no nested directory
pub const FLAT_BUILD: &str = "mkdir -p dist/assets \
    && printf '<!doctype html>' > dist/index.html \
    && printf 'body{}' > dist/assets/app.css";

/// Nested directory without the marker file
pub const NO_MARKER_BUILD: &str = "mkdir -p dist/public && printf 'export {}' > dist/public/a.js";

/// Records the child environment inside the output
pub const ENV_ECHO_BUILD: &str = "mkdir -p dist/public \
    && printf '%s' \"$NODE_ENV\" > dist/public/node_env.txt \
    && printf '%s' \"$VITE_BASE\" > dist/public/vite_base.txt \
    && printf '<!doctype html>' > dist/public/index.html";
