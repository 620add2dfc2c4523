pub const REQUEST_FULLSCREEN_JS: &str = r"(function() {
    if (document.fullscreenElement || document.webkitFullscreenElement) return;
    const el = document.documentElement;
    const request = el.requestFullscreen || el.webkitRequestFullscreen;
    if (request) {
        Promise.resolve(request.call(el)).catch(() => {});
    }
})();";

pub const EXIT_FULLSCREEN_JS: &str = r"(function() {
    if (!(document.fullscreenElement || document.webkitFullscreenElement)) return;
    const exit = document.exitFullscreen || document.webkitExitFullscreen;
    if (exit) {
        Promise.resolve(exit.call(document)).catch(() => {});
    }
})();";

/// Streams `true`/`false` through `dioxus.send` on every fullscreen change
/// until anything is sent back.
pub const FULLSCREEN_WATCH_JS: &str = r#"
const current = () => !!(document.fullscreenElement || document.webkitFullscreenElement);
const notify = () => dioxus.send(current());
document.addEventListener("fullscreenchange", notify);
document.addEventListener("webkitfullscreenchange", notify);
await dioxus.recv();
document.removeEventListener("fullscreenchange", notify);
document.removeEventListener("webkitfullscreenchange", notify);
"#;

/// Blocking alert that reports back through `dioxus.send` once dismissed.
pub fn notice_script(message: &str) -> String {
    format!("alert({message:?});\ndioxus.send(true);")
}
