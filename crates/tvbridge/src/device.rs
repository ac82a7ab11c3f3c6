use async_trait::async_trait;

use tvbridge_bravia::button::ButtonCode;
use tvbridge_bravia::model::{
    AppInfo, Content, ExternalInput, PlayingContent, TARGET_SPEAKER, VolumeInfo,
};
use tvbridge_bravia::{BraviaClient, Error};

/// Capability surface of the television, as far as the bridge needs it.
/// One round-trip per call, no retries; any failure surfaces as [`Error`].
#[async_trait]
pub trait Device: Send + Sync {
    async fn get_power_status(&self) -> Result<bool, Error>;

    async fn set_power_status(&self, on: bool) -> Result<(), Error>;

    async fn get_volume_information(&self) -> Result<Vec<VolumeInfo>, Error>;

    async fn set_volume_level(&self, level: u8) -> Result<(), Error>;

    async fn set_mute(&self, muted: bool) -> Result<(), Error>;

    async fn get_application_list(&self, exclude_builtin: bool) -> Result<Vec<AppInfo>, Error>;

    async fn set_active_app(&self, uri: &str) -> Result<(), Error>;

    async fn get_external_inputs(&self) -> Result<Vec<ExternalInput>, Error>;

    async fn get_playing_content(&self) -> Result<Option<PlayingContent>, Error>;

    async fn get_content_list(&self, source: &str) -> Result<Vec<Content>, Error>;

    async fn set_play_content(&self, uri: &str) -> Result<(), Error>;

    async fn send_button(&self, code: ButtonCode) -> Result<(), Error>;
}

#[async_trait]
impl Device for BraviaClient {
    async fn get_power_status(&self) -> Result<bool, Error> {
        BraviaClient::get_power_status(self).await
    }

    async fn set_power_status(&self, on: bool) -> Result<(), Error> {
        BraviaClient::set_power_status(self, on).await
    }

    async fn get_volume_information(&self) -> Result<Vec<VolumeInfo>, Error> {
        BraviaClient::get_volume_information(self).await
    }

    async fn set_volume_level(&self, level: u8) -> Result<(), Error> {
        self.set_audio_volume(TARGET_SPEAKER, level).await
    }

    async fn set_mute(&self, muted: bool) -> Result<(), Error> {
        self.set_audio_mute(muted).await
    }

    async fn get_application_list(&self, exclude_builtin: bool) -> Result<Vec<AppInfo>, Error> {
        BraviaClient::get_application_list(self, exclude_builtin).await
    }

    async fn set_active_app(&self, uri: &str) -> Result<(), Error> {
        BraviaClient::set_active_app(self, uri).await
    }

    async fn get_external_inputs(&self) -> Result<Vec<ExternalInput>, Error> {
        BraviaClient::get_external_inputs(self).await
    }

    async fn get_playing_content(&self) -> Result<Option<PlayingContent>, Error> {
        BraviaClient::get_playing_content(self).await
    }

    async fn get_content_list(&self, source: &str) -> Result<Vec<Content>, Error> {
        BraviaClient::get_content_list(self, source).await
    }

    async fn set_play_content(&self, uri: &str) -> Result<(), Error> {
        BraviaClient::set_play_content(self, uri).await
    }

    async fn send_button(&self, code: ButtonCode) -> Result<(), Error> {
        BraviaClient::send_button(self, code).await
    }
}
