pub mod button;
pub mod model;

mod rpc;

use std::sync::atomic::{AtomicU32, Ordering};

use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::button::ButtonCode;
use crate::model::{
    AppInfo, Content, ExternalInput, PlayingContent, RawApp, RawContent, RawExternalInput,
    VolumeInfo,
};
use crate::rpc::{RpcRequest, RpcResponse};

/// Error codes the device reports when nothing is playing (illegal state,
/// display turned off). Both mean "no content", not a failure.
const ERROR_ILLEGAL_STATE: i32 = 7;
const ERROR_DISPLAY_OFF: i32 = 40005;

const CONTENT_PAGE_SIZE: usize = 50;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Error reported by the device itself; the message is passed through
    /// untouched.
    #[error("{message}")]
    Api { code: i32, message: String },

    #[error("unexpected device response: {0}")]
    Protocol(String),
}

/// IP-control client for a single television. JSON-RPC for the service
/// endpoints, SOAP IRCC for button presses. Cheap to share: one HTTP
/// connection pool, no other state.
pub struct BraviaClient {
    http: reqwest::Client,
    base_url: String,
    psk: String,
    next_id: AtomicU32,
}

impl BraviaClient {
    pub fn new(host: &str, psk: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("http://{host}/sony"),
            psk: psk.to_string(),
            next_id: AtomicU32::new(1),
        }
    }

    async fn call(
        &self,
        service: &str,
        method: &str,
        version: &str,
        params: Vec<Value>,
    ) -> Result<Value, Error> {
        let request = RpcRequest {
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            version,
        };

        debug!(service, method, "Calling the device");

        let response: RpcResponse = self
            .http
            .post(format!("{}/{service}", self.base_url))
            .header("X-Auth-PSK", &self.psk)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_result()
    }

    pub async fn get_power_status(&self) -> Result<bool, Error> {
        #[derive(serde::Deserialize)]
        struct PowerStatus {
            status: String,
        }

        let result = self.call("system", "getPowerStatus", "1.0", vec![]).await?;
        let status: PowerStatus = rpc::first(result)?;

        Ok(status.status == "active")
    }

    pub async fn set_power_status(&self, on: bool) -> Result<(), Error> {
        self.call("system", "setPowerStatus", "1.0", vec![json!({"status": on})])
            .await?;

        Ok(())
    }

    pub async fn get_volume_information(&self) -> Result<Vec<VolumeInfo>, Error> {
        let result = self
            .call("audio", "getVolumeInformation", "1.0", vec![])
            .await?;

        rpc::list(result)
    }

    /// The device expects the volume as a decimal string, not a number.
    pub async fn set_audio_volume(&self, target: &str, level: u8) -> Result<(), Error> {
        self.call(
            "audio",
            "setAudioVolume",
            "1.0",
            vec![json!({"target": target, "volume": level.to_string()})],
        )
        .await?;

        Ok(())
    }

    pub async fn set_audio_mute(&self, muted: bool) -> Result<(), Error> {
        self.call("audio", "setAudioMute", "1.0", vec![json!({"status": muted})])
            .await?;

        Ok(())
    }

    pub async fn get_application_list(&self, exclude_builtin: bool) -> Result<Vec<AppInfo>, Error> {
        let result = self
            .call("appControl", "getApplicationList", "1.0", vec![])
            .await?;

        let apps: Vec<RawApp> = rpc::list(result)?;

        Ok(apps
            .into_iter()
            .filter(|app| !(exclude_builtin && app.is_builtin()))
            .map(AppInfo::from)
            .collect())
    }

    pub async fn set_active_app(&self, uri: &str) -> Result<(), Error> {
        self.call("appControl", "setActiveApp", "1.0", vec![json!({"uri": uri})])
            .await?;

        Ok(())
    }

    pub async fn get_external_inputs(&self) -> Result<Vec<ExternalInput>, Error> {
        let result = self
            .call("avContent", "getCurrentExternalInputsStatus", "1.0", vec![])
            .await?;

        let inputs: Vec<RawExternalInput> = rpc::list(result)?;

        Ok(inputs.into_iter().map(ExternalInput::from).collect())
    }

    /// `Ok(None)` when the device reports nothing is playing.
    pub async fn get_playing_content(&self) -> Result<Option<PlayingContent>, Error> {
        let result = self
            .call("avContent", "getPlayingContentInfo", "1.0", vec![])
            .await;

        match result {
            Ok(value) => Ok(Some(rpc::first(value)?)),
            Err(Error::Api { code, .. })
                if code == ERROR_ILLEGAL_STATE || code == ERROR_DISPLAY_OFF =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Fetches the full content list for a source, page by page.
    pub async fn get_content_list(&self, source: &str) -> Result<Vec<Content>, Error> {
        let mut contents = Vec::new();
        let mut index = 0;

        loop {
            let result = self
                .call(
                    "avContent",
                    "getContentList",
                    "1.5",
                    vec![json!({
                        "source": source,
                        "stIdx": index,
                        "cnt": CONTENT_PAGE_SIZE,
                    })],
                )
                .await?;

            let page: Vec<RawContent> = rpc::list(result)?;
            let page_len = page.len();

            contents.extend(page.into_iter().map(Content::from));

            if page_len < CONTENT_PAGE_SIZE {
                break;
            }

            index += page_len;
        }

        Ok(contents)
    }

    pub async fn set_play_content(&self, uri: &str) -> Result<(), Error> {
        self.call("avContent", "setPlayContent", "1.0", vec![json!({"uri": uri})])
            .await?;

        Ok(())
    }

    pub async fn send_button(&self, code: ButtonCode) -> Result<(), Error> {
        let body = format!(
            concat!(
                r#"<?xml version="1.0"?>"#,
                r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" "#,
                r#"s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">"#,
                "<s:Body>",
                r#"<u:X_SendIRCC xmlns:u="urn:schemas-sony-com:service:IRCC:1">"#,
                "<IRCCCode>{code}</IRCCCode>",
                "</u:X_SendIRCC>",
                "</s:Body>",
                "</s:Envelope>",
            ),
            code = code.ircc_code(),
        );

        debug!(%code, "Sending a button press");

        self.http
            .post(format!("{}/ircc", self.base_url))
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header(
                "SOAPACTION",
                "\"urn:schemas-sony-com:service:IRCC:1#X_SendIRCC\"",
            )
            .header("X-Auth-PSK", &self.psk)
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
