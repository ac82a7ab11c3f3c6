use std::str::FromStr;
use std::sync::Arc;

use strum::EnumString;
use tracing::info;

use tvbridge_bravia::button::ButtonCode;
use tvbridge_bravia::model::TARGET_SPEAKER;

use crate::catalog::{self, Candidate};
use crate::channel::{self, ChannelCandidate, ChannelNumber};
use crate::config::DeviceConfig;
use crate::device::Device;

/// Terminal per-request outcomes. `Validation` never reaches the device;
/// `Device` carries the device's own message untouched.
#[derive(Debug, Eq, PartialEq)]
pub enum RemoteError {
    Validation(String),
    NotFound(String),
    Device(String),
}

impl From<tvbridge_bravia::Error> for RemoteError {
    fn from(err: tvbridge_bravia::Error) -> Self {
        Self::Device(err.to_string())
    }
}

#[derive(Clone, Copy, Debug, EnumString, Eq, PartialEq)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    pub fn parse(input: &str) -> Result<Self, RemoteError> {
        Self::from_str(input).map_err(|_| {
            RemoteError::Validation(
                "Invalid power status specified, must be 'on' or 'off'".to_string(),
            )
        })
    }
}

#[derive(Clone, Copy, Debug, EnumString, Eq, PartialEq)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum PlaybackAction {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    Forward,
    Reverse,
}

impl PlaybackAction {
    pub fn parse(input: &str) -> Result<Self, RemoteError> {
        Self::from_str(input).map_err(|_| {
            RemoteError::Validation(
                "Invalid playback command. Must be 'play', 'pause', 'stop', 'next', 'previous', \
                 'forward', or 'reverse'."
                    .to_string(),
            )
        })
    }

    fn button(self) -> ButtonCode {
        match self {
            Self::Play => ButtonCode::Play,
            Self::Pause => ButtonCode::Pause,
            Self::Stop => ButtonCode::Stop,
            Self::Next => ButtonCode::Next,
            Self::Previous => ButtonCode::Prev,
            Self::Forward => ButtonCode::FlashPlus,
            Self::Reverse => ButtonCode::FlashMinus,
        }
    }
}

#[derive(Clone, Debug)]
pub struct VolumeStatus {
    pub muted: bool,
    pub level: i32,
}

/// Stateless dispatcher in front of the device. Every operation re-fetches
/// whatever catalog it needs and issues at most one device action.
pub struct Remote {
    device: Arc<dyn Device>,
    digital_source: String,
    analog_source: String,
}

impl Remote {
    pub fn new(device: Arc<dyn Device>, config: &DeviceConfig) -> Self {
        Self {
            device,
            digital_source: config.digital_source.clone(),
            analog_source: config.analog_source.clone(),
        }
    }

    pub async fn set_power(&self, state: PowerState) -> Result<(), RemoteError> {
        self.device
            .set_power_status(state == PowerState::On)
            .await?;

        Ok(())
    }

    pub async fn power_status(&self) -> Result<bool, RemoteError> {
        Ok(self.device.get_power_status().await?)
    }

    pub async fn set_volume(&self, level: &str) -> Result<(), RemoteError> {
        let level: i64 = level
            .parse()
            .map_err(|_| RemoteError::Validation("level must be an integer value".to_string()))?;

        if !(0..=100).contains(&level) {
            return Err(RemoteError::Validation(
                "level must be between 0 and 100".to_string(),
            ));
        }

        self.device.set_volume_level(level as u8).await?;

        Ok(())
    }

    pub async fn set_mute(&self, muted: bool) -> Result<(), RemoteError> {
        self.device.set_mute(muted).await?;

        Ok(())
    }

    pub async fn volume(&self) -> Result<VolumeStatus, RemoteError> {
        let speakers = self
            .device
            .get_volume_information()
            .await?
            .into_iter()
            .find(|info| info.target == TARGET_SPEAKER)
            .ok_or_else(|| {
                RemoteError::Device("Speaker volume information is unavailable".to_string())
            })?;

        Ok(VolumeStatus {
            muted: speakers.muted,
            level: speakers.level,
        })
    }

    pub async fn list_apps(&self) -> Result<Vec<String>, RemoteError> {
        let apps = catalog::fetch_apps(self.device.as_ref()).await?;

        Ok(apps.into_iter().map(|app| app.name).collect())
    }

    pub async fn launch_app(&self, name: &str) -> Result<Candidate, RemoteError> {
        let apps = catalog::fetch_apps(self.device.as_ref()).await?;

        let app = crate::matcher::best_match(name, &apps, |query, app| {
            crate::matcher::ratio(query, &app.name)
        })
        .ok_or_else(|| RemoteError::NotFound("Could not locate app".to_string()))?;

        info!(app = %app.name, "Launching an app");
        self.device.set_active_app(&app.uri).await?;

        Ok(app.clone())
    }

    pub async fn list_inputs(&self) -> Result<Vec<Candidate>, RemoteError> {
        Ok(catalog::fetch_inputs(self.device.as_ref()).await?)
    }

    /// Both the device-reported name and the user-assigned label are scored;
    /// the best field across all inputs wins.
    pub async fn set_input(&self, query: &str) -> Result<Candidate, RemoteError> {
        let inputs = catalog::fetch_inputs(self.device.as_ref()).await?;

        let input = crate::matcher::best_match(query, &inputs, |query, input| {
            let score = crate::matcher::token_set_ratio(query, &input.name);

            match &input.custom_label {
                Some(label) => score.max(crate::matcher::token_set_ratio(query, label)),
                None => score,
            }
        })
        .ok_or_else(|| RemoteError::NotFound("Could not locate input".to_string()))?;

        info!(input = %input.name, "Switching the input");
        self.device.set_play_content(&input.uri).await?;

        Ok(input.clone())
    }

    pub async fn current_input(&self) -> Result<Option<String>, RemoteError> {
        let playing = self.device.get_playing_content().await?.ok_or_else(|| {
            RemoteError::NotFound("Not currently displaying an external input".to_string())
        })?;

        Ok(playing.name)
    }

    pub async fn set_channel_by_number(&self, input: &str) -> Result<ChannelCandidate, RemoteError> {
        let number = ChannelNumber::parse(input).ok_or_else(|| {
            RemoteError::Validation(
                "channel must be a number like '5', '12.3', or '12-3'".to_string(),
            )
        })?;

        let channels = catalog::fetch_channels(
            self.device.as_ref(),
            &self.digital_source,
            &self.analog_source,
            number.sub.is_none(),
        )
        .await?;

        let channel = channel::resolve_by_number(&channels, &number)
            .ok_or_else(|| RemoteError::NotFound("Could not locate channel".to_string()))?;

        info!(channel = %channel.info.channel_full, "Tuning a channel");
        self.device.set_play_content(&channel.uri).await?;

        Ok(channel.clone())
    }

    pub async fn set_channel_by_name(&self, query: &str) -> Result<ChannelCandidate, RemoteError> {
        // Analog channels carry no names, so only digital ones are fetched.
        let channels = catalog::fetch_channels(
            self.device.as_ref(),
            &self.digital_source,
            &self.analog_source,
            false,
        )
        .await?;

        let channel = channel::resolve_by_name(&channels, query)
            .ok_or_else(|| RemoteError::NotFound("Could not locate channel".to_string()))?;

        info!(channel = %channel.info.channel_full, "Tuning a channel");
        self.device.set_play_content(&channel.uri).await?;

        Ok(channel.clone())
    }

    pub async fn list_channels(&self) -> Result<Vec<ChannelCandidate>, RemoteError> {
        let channels = catalog::fetch_channels(
            self.device.as_ref(),
            &self.digital_source,
            &self.analog_source,
            true,
        )
        .await?;

        Ok(channels
            .into_iter()
            .filter(|channel| channel.info.visible)
            .collect())
    }

    pub async fn playback(&self, action: PlaybackAction) -> Result<(), RemoteError> {
        self.device.send_button(action.button()).await?;

        Ok(())
    }

    pub async fn home(&self) -> Result<(), RemoteError> {
        self.device.send_button(ButtonCode::Home).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tvbridge_bravia::Error;
    use tvbridge_bravia::model::{
        AppInfo, ChannelInfo, Content, ExternalInput, PlayingContent, VolumeInfo,
    };

    use super::*;

    #[derive(Default)]
    struct FakeDevice {
        apps: Vec<AppInfo>,
        inputs: Vec<ExternalInput>,
        digital: Vec<Content>,
        analog: Vec<Content>,
        playing: Option<PlayingContent>,
        volume: Vec<VolumeInfo>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeDevice {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Device for FakeDevice {
        async fn get_power_status(&self) -> Result<bool, Error> {
            self.record("get_power_status");
            Ok(true)
        }

        async fn set_power_status(&self, on: bool) -> Result<(), Error> {
            self.record(format!("set_power_status:{on}"));
            Ok(())
        }

        async fn get_volume_information(&self) -> Result<Vec<VolumeInfo>, Error> {
            self.record("get_volume_information");
            Ok(self.volume.clone())
        }

        async fn set_volume_level(&self, level: u8) -> Result<(), Error> {
            self.record(format!("set_volume_level:{level}"));
            Ok(())
        }

        async fn set_mute(&self, muted: bool) -> Result<(), Error> {
            self.record(format!("set_mute:{muted}"));
            Ok(())
        }

        async fn get_application_list(&self, _exclude_builtin: bool) -> Result<Vec<AppInfo>, Error> {
            self.record("get_application_list");
            Ok(self.apps.clone())
        }

        async fn set_active_app(&self, uri: &str) -> Result<(), Error> {
            self.record(format!("set_active_app:{uri}"));
            Ok(())
        }

        async fn get_external_inputs(&self) -> Result<Vec<ExternalInput>, Error> {
            self.record("get_external_inputs");
            Ok(self.inputs.clone())
        }

        async fn get_playing_content(&self) -> Result<Option<PlayingContent>, Error> {
            self.record("get_playing_content");
            Ok(self.playing.clone())
        }

        async fn get_content_list(&self, source: &str) -> Result<Vec<Content>, Error> {
            self.record(format!("get_content_list:{source}"));
            Ok(match source {
                "tv:atsct" => self.digital.clone(),
                _ => self.analog.clone(),
            })
        }

        async fn set_play_content(&self, uri: &str) -> Result<(), Error> {
            self.record(format!("set_play_content:{uri}"));
            Ok(())
        }

        async fn send_button(&self, code: ButtonCode) -> Result<(), Error> {
            self.record(format!("send_button:{code}"));
            Ok(())
        }
    }

    fn remote(device: Arc<FakeDevice>) -> Remote {
        let config = DeviceConfig {
            host: "test".to_string(),
            psk: "0000".to_string(),
            digital_source: "tv:atsct".to_string(),
            analog_source: "tv:analog".to_string(),
        };

        Remote::new(device, &config)
    }

    fn content(main: &str, sub: Option<&str>, visible: bool, name: Option<&str>) -> Content {
        let full = match sub {
            Some(sub) => format!("{main}.{sub}"),
            None => main.to_string(),
        };

        Content {
            name: name.map(str::to_string),
            uri: format!("tv:trip={full}"),
            channel: Some(ChannelInfo {
                channel_main: main.to_string(),
                channel_sub: sub.map(str::to_string),
                channel_full: full,
                visible,
            }),
        }
    }

    #[tokio::test]
    async fn test_volume_out_of_range_never_reaches_device() {
        let device = Arc::new(FakeDevice::default());
        let remote = remote(device.clone());

        for level in ["150", "-1", "abc"] {
            let result = remote.set_volume(level).await;
            assert!(matches!(result, Err(RemoteError::Validation(_))), "{level}");
        }

        assert!(device.calls().is_empty());
    }

    #[tokio::test]
    async fn test_volume_boundary_values() {
        let device = Arc::new(FakeDevice::default());
        let remote = remote(device.clone());

        remote.set_volume("0").await.unwrap();
        remote.set_volume("100").await.unwrap();

        assert_eq!(
            device.calls(),
            vec!["set_volume_level:0", "set_volume_level:100"],
        );
    }

    #[tokio::test]
    async fn test_volume_requires_speaker_entry() {
        let device = Arc::new(FakeDevice {
            volume: vec![VolumeInfo {
                target: "headphone".to_string(),
                level: 10,
                muted: false,
            }],
            ..Default::default()
        });
        let remote = remote(device);

        assert!(matches!(remote.volume().await, Err(RemoteError::Device(_))));
    }

    #[tokio::test]
    async fn test_launch_app_fuzzy() {
        let device = Arc::new(FakeDevice {
            apps: vec![
                AppInfo {
                    name: "YouTube".to_string(),
                    uri: "app:youtube".to_string(),
                },
                AppInfo {
                    name: "Netflix".to_string(),
                    uri: "app:netflix".to_string(),
                },
            ],
            ..Default::default()
        });
        let remote = remote(device.clone());

        let app = remote.launch_app("netflis").await.unwrap();

        assert_eq!(app.name, "Netflix");
        assert!(device.calls().contains(&"set_active_app:app:netflix".to_string()));
    }

    #[tokio::test]
    async fn test_launch_app_not_found() {
        let device = Arc::new(FakeDevice::default());
        let remote = remote(device.clone());

        let result = remote.launch_app("anything").await;

        assert!(matches!(result, Err(RemoteError::NotFound(_))));
        assert_eq!(device.calls(), vec!["get_application_list"]);
    }

    #[tokio::test]
    async fn test_set_input_matches_custom_label() {
        let device = Arc::new(FakeDevice {
            inputs: vec![
                ExternalInput {
                    name: "HDMI 1".to_string(),
                    custom_label: None,
                    uri: "extInput:hdmi?port=1".to_string(),
                },
                ExternalInput {
                    name: "HDMI 2".to_string(),
                    custom_label: Some("PlayStation 5".to_string()),
                    uri: "extInput:hdmi?port=2".to_string(),
                },
            ],
            ..Default::default()
        });
        let remote = remote(device.clone());

        let input = remote.set_input("playstation").await.unwrap();

        assert_eq!(input.name, "HDMI 2");
        assert!(
            device
                .calls()
                .contains(&"set_play_content:extInput:hdmi?port=2".to_string())
        );
    }

    #[tokio::test]
    async fn test_current_input_none_is_not_found() {
        let device = Arc::new(FakeDevice::default());
        let remote = remote(device);

        assert!(matches!(
            remote.current_input().await,
            Err(RemoteError::NotFound(_)),
        ));
    }

    #[tokio::test]
    async fn test_channel_bad_syntax_never_reaches_device() {
        let device = Arc::new(FakeDevice::default());
        let remote = remote(device.clone());

        let result = remote.set_channel_by_number("abc").await;

        assert!(matches!(result, Err(RemoteError::Validation(_))));
        assert!(device.calls().is_empty());
    }

    #[tokio::test]
    async fn test_channel_digital_precedence() {
        let device = Arc::new(FakeDevice {
            digital: vec![content("5", Some("1"), true, Some("NBC"))],
            analog: vec![content("5", None, true, None)],
            ..Default::default()
        });
        let remote = remote(device.clone());

        let channel = remote.set_channel_by_number("5").await.unwrap();

        assert_eq!(channel.kind, crate::channel::ChannelKind::Digital);
        assert!(device.calls().contains(&"set_play_content:tv:trip=5.1".to_string()));
    }

    #[tokio::test]
    async fn test_sub_number_skips_analog_fetch() {
        let device = Arc::new(FakeDevice {
            digital: vec![content("12", Some("3"), true, None)],
            analog: vec![content("12", None, true, None)],
            ..Default::default()
        });
        let remote = remote(device.clone());

        remote.set_channel_by_number("12.3").await.unwrap();

        let calls = device.calls();
        assert!(calls.contains(&"get_content_list:tv:atsct".to_string()));
        assert!(!calls.contains(&"get_content_list:tv:analog".to_string()));
    }

    #[tokio::test]
    async fn test_channel_by_name_ignores_analog() {
        let device = Arc::new(FakeDevice {
            digital: vec![content("7", Some("1"), true, Some("ABC"))],
            analog: vec![content("7", None, true, Some("ABC Analog"))],
            ..Default::default()
        });
        let remote = remote(device.clone());

        let channel = remote.set_channel_by_name("abc").await.unwrap();

        assert_eq!(channel.kind, crate::channel::ChannelKind::Digital);
        assert!(!device.calls().contains(&"get_content_list:tv:analog".to_string()));
    }

    #[tokio::test]
    async fn test_list_channels_hides_invisible() {
        let device = Arc::new(FakeDevice {
            digital: vec![
                content("5", Some("1"), true, Some("NBC")),
                content("6", Some("1"), false, Some("Hidden")),
            ],
            ..Default::default()
        });
        let remote = remote(device);

        let channels = remote.list_channels().await.unwrap();

        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].info.channel_main, "5");
    }

    #[tokio::test]
    async fn test_playback_maps_to_buttons() {
        let device = Arc::new(FakeDevice::default());
        let remote = remote(device.clone());

        remote
            .playback(PlaybackAction::parse("Previous").unwrap())
            .await
            .unwrap();

        assert_eq!(device.calls(), vec!["send_button:prev"]);
    }

    #[test]
    fn test_playback_rejects_unknown_action() {
        assert!(matches!(
            PlaybackAction::parse("rewind"),
            Err(RemoteError::Validation(_)),
        ));
    }

    #[test]
    fn test_power_state_parsing() {
        assert_eq!(PowerState::parse("ON").unwrap(), PowerState::On);
        assert_eq!(PowerState::parse("off").unwrap(), PowerState::Off);
        assert!(matches!(
            PowerState::parse("standby"),
            Err(RemoteError::Validation(_)),
        ));
    }
}
