use super::*;

#[test]
fn default_settings_use_builtin_markers_and_fallback() {
    let settings = Settings::default();
    assert_eq!(settings.markers.first().map(String::as_str), Some(".git"));
    assert!(settings.markers.iter().any(|m| m == "pyproject.toml"));
    assert_eq!(settings.venv_dirs, vec![".venv".to_string()]);
    assert_eq!(settings.fallback_interpreter, "python3");
}

#[test]
fn partial_json_fills_missing_fields_with_defaults() {
    let settings: Settings =
        serde_json::from_str(r#"{ "fallback_interpreter": "python" }"#).expect("parse settings");
    assert_eq!(settings.fallback_interpreter, "python");
    assert_eq!(settings.markers, Settings::default().markers);
    assert_eq!(settings.venv_dirs, Settings::default().venv_dirs);
}

#[test]
fn empty_object_is_default_settings() {
    let settings: Settings = serde_json::from_str("{}").expect("parse settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn serialized_settings_keep_marker_order() {
    let settings = Settings {
        markers: vec!["b".to_string(), "a".to_string()],
        ..Settings::default()
    };
    let json = serde_json::to_string(&settings).expect("serialize Settings");
    let decoded: Settings = serde_json::from_str(&json).expect("deserialize Settings");
    assert_eq!(decoded.markers, vec!["b".to_string(), "a".to_string()]);
}
