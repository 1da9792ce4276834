/// Full navigation to `path`, adding a history entry.
pub fn go_to(path: &str) {
    if let Some(win) = web_sys::window() {
        if let Err(err) = win.location().set_href(path) {
            log::error!("navigation to {} failed: {:?}", path, err);
        }
    }
}
