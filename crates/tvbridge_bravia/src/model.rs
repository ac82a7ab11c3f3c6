use serde::Deserialize;

/// Volume target reported by `getVolumeInformation`.
pub const TARGET_SPEAKER: &str = "speaker";

#[derive(Clone, Debug, Deserialize)]
pub struct VolumeInfo {
    pub target: String,

    #[serde(rename = "volume")]
    pub level: i32,

    #[serde(rename = "mute")]
    pub muted: bool,
}

#[derive(Clone, Debug)]
pub struct AppInfo {
    pub name: String,
    pub uri: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RawApp {
    pub title: Option<String>,
    pub uri: Option<String>,
}

impl RawApp {
    /// Apps the set ships with expose `localapp://` URIs; everything
    /// installed by the user carries an Android component URI.
    pub fn is_builtin(&self) -> bool {
        self.uri
            .as_deref()
            .is_none_or(|uri| uri.starts_with("localapp://"))
    }
}

impl From<RawApp> for AppInfo {
    fn from(value: RawApp) -> Self {
        Self {
            name: value.title.unwrap_or_default(),
            uri: value.uri.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExternalInput {
    pub name: String,
    pub custom_label: Option<String>,
    pub uri: String,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RawExternalInput {
    pub title: Option<String>,

    /// User-assigned label. The device reports an empty string when unset.
    pub label: Option<String>,

    pub uri: String,
}

impl From<RawExternalInput> for ExternalInput {
    fn from(value: RawExternalInput) -> Self {
        Self {
            name: value.title.unwrap_or_default(),
            custom_label: value.label.filter(|label| !label.is_empty()),
            uri: value.uri,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlayingContent {
    #[serde(rename = "title")]
    pub name: Option<String>,

    pub uri: Option<String>,
}

/// Broadcast channel numbering parsed from the device's `dispNum` string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChannelInfo {
    pub channel_main: String,
    pub channel_sub: Option<String>,
    pub channel_full: String,
    pub visible: bool,
}

impl ChannelInfo {
    pub(crate) fn from_disp_num(disp_num: &str, visible: bool) -> Self {
        let (main, sub) = match disp_num.split_once(['.', '-']) {
            Some((main, sub)) => (main, Some(sub)),
            None => (disp_num, None),
        };

        Self {
            channel_main: main.to_string(),
            channel_sub: sub.map(str::to_string),
            channel_full: disp_num.to_string(),
            visible,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Content {
    pub name: Option<String>,
    pub uri: String,
    pub channel: Option<ChannelInfo>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RawContent {
    pub title: Option<String>,

    #[serde(rename = "dispNum")]
    pub disp_num: Option<String>,

    pub uri: String,

    /// 0 means hidden from the channel list; absent means visible.
    pub visibility: Option<u8>,
}

impl From<RawContent> for Content {
    fn from(value: RawContent) -> Self {
        let visible = value.visibility != Some(0);

        Self {
            name: value.title,
            uri: value.uri,
            channel: value
                .disp_num
                .as_deref()
                .map(|disp_num| ChannelInfo::from_disp_num(disp_num, visible)),
        }
    }
}
