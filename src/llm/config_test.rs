use super::*;

const VARS: [&str; 7] = [
    "LLM_MODEL",
    "LLM_API_KEY_ENV",
    "LLM_BASE_URL",
    "LLM_REQUEST_TIMEOUT_SECS",
    "LLM_CONNECT_TIMEOUT_SECS",
    "GEMINI_API_KEY",
    "EGENIUS_TEST_KEY",
];

fn clear_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
fn from_env_scenarios() {
    // One test so env mutations never interleave across test threads.
    clear_env();

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "GEMINI_API_KEY"));

    unsafe { std::env::set_var("GEMINI_API_KEY", " default-key ") };
    assert_eq!(LlmConfig::from_env().unwrap(), LlmConfig::new("default-key"));

    unsafe {
        std::env::set_var("LLM_API_KEY_ENV", "EGENIUS_TEST_KEY");
        std::env::set_var("EGENIUS_TEST_KEY", "   ");
    }
    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "EGENIUS_TEST_KEY"));

    unsafe {
        std::env::set_var("EGENIUS_TEST_KEY", "secret");
        std::env::set_var("LLM_MODEL", "gemini-2.5-pro");
        std::env::set_var("LLM_BASE_URL", "https://example.test/v1beta/");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "soon");
    }
    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, "gemini-2.5-pro");
    assert_eq!(cfg.base_url, "https://example.test/v1beta");
    assert_eq!(cfg.timeouts.request, Duration::from_secs(42));
    assert_eq!(cfg.timeouts.connect, DEFAULT_CONNECT_TIMEOUT);

    unsafe { std::env::set_var("LLM_BASE_URL", "ftp://example.test") };
    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::InvalidConfig(ref msg) if msg.contains("LLM_BASE_URL")));

    clear_env();
}

#[test]
fn new_uses_defaults() {
    let cfg = LlmConfig::new("k");
    assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
    assert_eq!(cfg.base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(cfg.timeouts.request, Duration::from_secs(120));
    assert_eq!(cfg.timeouts.connect, Duration::from_secs(10));
}
