use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Status text shown while the speed slider moves.
pub fn speed_label(speed: u32) -> &'static str {
    if speed > 80 {
        "Speed: Very Fast"
    } else if speed > 40 {
        "Speed: Medium"
    } else {
        "Speed: Slow"
    }
}

/// Raw (still URI-encoded) value of `key` in a `?a=b&c=d` query string.
pub fn query_param<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_label_thresholds() {
        assert_eq!(speed_label(100), "Speed: Very Fast");
        assert_eq!(speed_label(81), "Speed: Very Fast");
        assert_eq!(speed_label(80), "Speed: Medium");
        assert_eq!(speed_label(41), "Speed: Medium");
        assert_eq!(speed_label(40), "Speed: Slow");
        assert_eq!(speed_label(0), "Speed: Slow");
    }

    #[test]
    fn query_param_finds_raw_value() {
        let search = "?algo=bfs&solver=http%3A%2F%2Flocalhost%3A5000%2Fsolve";
        assert_eq!(
            query_param(search, "solver"),
            Some("http%3A%2F%2Flocalhost%3A5000%2Fsolve")
        );
        assert_eq!(query_param(search, "algo"), Some("bfs"));
        assert_eq!(query_param(search, "missing"), None);
        assert_eq!(query_param("", "solver"), None);
    }
}
