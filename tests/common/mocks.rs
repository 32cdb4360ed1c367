use std::sync::Mutex;
use webmap_browser::ErrorNotifier;

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ErrorNotifier for RecordingNotifier {
    fn notify_error(&self, _title: &str, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
