#![no_main]

use exprcalc_bootstrap::AppConfig;
use figment::Figment;
use figment::providers::{Format, Yaml};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Extraction and validation must fail cleanly on arbitrary documents
        if let Ok(config) = Figment::new().merge(Yaml::string(s)).extract::<AppConfig>() {
            let _ = config.api_gateway.validate();
            let _ = config.to_yaml();
        }
    }
});
