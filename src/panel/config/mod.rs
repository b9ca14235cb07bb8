mod settings;

use embedded_graphics::pixelcolor::Rgb888;
use u8g2_fonts::{fonts, FontRenderer};

pub use settings::{
    DisplaySettings, MqttSettings, PanelSection, PanelSettings, Rotation, TouchSettings,
};

pub const PADDING: i32 = 5;
pub const BUTTON_PADDING_X: i32 = 10;
pub const LINE_SPACING: u32 = 4;
pub const MESSAGE_AREA_PADDING_X: i32 = PADDING * 2;
pub const SOURCE_COLUMN_MAX_CHARS: usize = 20;
pub const SOURCE_COLUMN_MAX_FRACTION_PCT: u32 = 25;
pub const CLOCK_TIME_SHARE_PCT: u32 = 60;
pub const ELLIPSIS: &str = "...";
pub const TIMESTAMP_SAMPLE: &str = "00:00:00";
pub const RELATIVE_TIMESTAMP_SAMPLE: &str = "-00:00:00";

pub const DEFAULT_MAX_MESSAGES: usize = 50;
/// Upper bound accepted for `panel.max_messages`.
pub const MAX_MESSAGES_LIMIT: usize = 10_000;
pub const DEFAULT_STICKY_WARN_THRESHOLD: usize = 100;
pub const DEFAULT_REFRESH_MS: u64 = 1_000;
pub const DEFAULT_EVENT_LOG_TITLE: &str = "EVENT LOG";
pub const DEFAULT_STREAM_LABEL: &str = "MQTT STREAM";
pub const CLOCK_TITLE: &str = "CURRENT TIME";
pub const DEFAULT_TOPIC_PREFIX: &str = "home/lcars_panel/";
pub const DEFAULT_CONTROL_SUFFIX: &str = "control";
pub const CONTROL_SOURCE_PREFIX: &str = "LCARS";

pub const BG_COLOR: Rgb888 = Rgb888::new(0, 0, 0);

pub const LCARS_ORANGE: Rgb888 = Rgb888::new(255, 157, 0);
pub const LCARS_BLUE: Rgb888 = Rgb888::new(155, 162, 255);
pub const LCARS_YELLOW: Rgb888 = Rgb888::new(255, 203, 95);
pub const LCARS_RED_DARK: Rgb888 = Rgb888::new(212, 112, 101);
pub const LCARS_PURPLE_LIGHT: Rgb888 = Rgb888::new(204, 153, 255);
pub const LCARS_CYAN: Rgb888 = Rgb888::new(102, 204, 255);

pub const TEXT_COLOR_TITLE: Rgb888 = LCARS_ORANGE;
pub const TEXT_COLOR_BODY: Rgb888 = LCARS_PURPLE_LIGHT;
pub const TEXT_COLOR_WARNING: Rgb888 = LCARS_YELLOW;
pub const TEXT_COLOR_ERROR: Rgb888 = LCARS_RED_DARK;
pub const TEXT_COLOR_CONTROL: Rgb888 = LCARS_CYAN;
pub const TEXT_COLOR_BUTTON_LABEL: Rgb888 = Rgb888::new(0, 0, 0);

pub const COLOR_BARS: Rgb888 = LCARS_ORANGE;
pub const COLOR_BUTTON_CLEAR: Rgb888 = LCARS_RED_DARK;
pub const COLOR_BUTTON_RELATIVE: Rgb888 = LCARS_BLUE;
pub const COLOR_BUTTON_CLOCK: Rgb888 = LCARS_YELLOW;
pub const COLOR_BUTTON_EVENTS: Rgb888 = LCARS_BLUE;
pub const PROBE_COLOR: Rgb888 = Rgb888::new(255, 0, 255);

pub const DEBUG_COLOR_STRUCTURE: Rgb888 = Rgb888::new(0, 255, 0);
pub const DEBUG_COLOR_CONTENT: Rgb888 = Rgb888::new(255, 0, 255);
pub const DEBUG_COLOR_WRAP_LINE: Rgb888 = Rgb888::new(0, 0, 255);

pub const TITLE_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_helvB24_tf>();
pub const BODY_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_helvR18_tf>();
pub const BUTTON_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_helvB18_tf>();

// Display faces for the clock, largest first; the clock picks the first one
// that fits its region.
pub const DISPLAY_FONT_58: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso58_tr>();
pub const DISPLAY_FONT_54: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso54_tr>();
pub const DISPLAY_FONT_46: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso46_tr>();
pub const DISPLAY_FONT_38: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso38_tr>();
pub const DISPLAY_FONT_32: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso32_tr>();
pub const DISPLAY_FONT_28: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso28_tr>();
pub const DISPLAY_FONT_24: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso24_tr>();
pub const DISPLAY_FONT_20: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso20_tr>();
pub const DISPLAY_FONT_16: FontRenderer = FontRenderer::new::<fonts::u8g2_font_logisoso16_tr>();
pub const DISPLAY_FONT_COUNT: u8 = 9;
pub const DISPLAY_FONT_NOMINAL_PX: [u32; DISPLAY_FONT_COUNT as usize] =
    [58, 54, 46, 38, 32, 28, 24, 20, 16];
