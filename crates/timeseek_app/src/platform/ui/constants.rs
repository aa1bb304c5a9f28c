pub const APP_NAME: &str = "timeseek";
pub const WINDOW_TITLE: &str = "Timeseek";
pub const PANEL_SIZE: [f32; 2] = [380.0, 640.0];
pub const PANEL_MIN_SIZE: [f32; 2] = [280.0, 320.0];

pub const INPUT_PANEL_ID: &str = "query_input";
pub const INPUT_HINT: &str = "Ask about this video…";
pub const SEND_LABEL: &str = "Send";
pub const SEND_BUTTON_WIDTH: f32 = 64.0;

pub const USER_LABEL: &str = "You:";
pub const SYSTEM_LABEL: &str = "AI:";
