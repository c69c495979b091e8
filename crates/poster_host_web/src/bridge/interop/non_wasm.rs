use super::*;

fn unsupported() -> String {
    "Browser object URLs are only available when compiled for wasm32".to_string()
}

pub fn has_object_urls() -> bool {
    false
}

pub fn create_object_url(_file: &IncomingFile) -> Result<String, String> {
    Err(unsupported())
}

pub fn revoke_object_url(_url: &str) {}

pub fn has_dialogs() -> bool {
    false
}

pub fn alert(_message: &str) {}

pub fn location_hash() -> String {
    String::new()
}

pub fn set_location_hash(_hash: &str) {}

pub fn has_launch_queue() -> bool {
    false
}

pub fn install_launch_consumer(_consumer: LaunchConsumer) -> bool {
    false
}
