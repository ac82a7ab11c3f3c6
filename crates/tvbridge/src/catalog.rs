use tvbridge_bravia::Error;
use tvbridge_bravia::model::Content;

use crate::channel::{ChannelCandidate, ChannelKind};
use crate::device::Device;

/// A selectable entity from the device's current catalog. Built fresh for
/// every request; nothing here is cached.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub name: String,
    pub custom_label: Option<String>,
    pub uri: String,
}

pub async fn fetch_apps(device: &dyn Device) -> Result<Vec<Candidate>, Error> {
    let apps = device.get_application_list(true).await?;

    Ok(apps
        .into_iter()
        .map(|app| Candidate {
            name: app.name,
            custom_label: None,
            uri: app.uri,
        })
        .collect())
}

pub async fn fetch_inputs(device: &dyn Device) -> Result<Vec<Candidate>, Error> {
    let inputs = device.get_external_inputs().await?;

    Ok(inputs
        .into_iter()
        .map(|input| Candidate {
            name: input.name,
            custom_label: input.custom_label,
            uri: input.uri,
        })
        .collect())
}

/// Digital channels are always fetched; analog only on request, since a
/// query with a sub-channel number can never match an analog broadcast.
pub async fn fetch_channels(
    device: &dyn Device,
    digital_source: &str,
    analog_source: &str,
    include_analog: bool,
) -> Result<Vec<ChannelCandidate>, Error> {
    let mut channels = tag(
        device.get_content_list(digital_source).await?,
        ChannelKind::Digital,
    );

    if include_analog {
        channels.extend(tag(
            device.get_content_list(analog_source).await?,
            ChannelKind::Analog,
        ));
    }

    Ok(channels)
}

fn tag(contents: Vec<Content>, kind: ChannelKind) -> Vec<ChannelCandidate> {
    contents
        .into_iter()
        .filter_map(|content| {
            // Entries without channel numbering are not broadcast channels.
            let info = content.channel?;

            Some(ChannelCandidate {
                name: content.name,
                uri: content.uri,
                kind,
                info,
            })
        })
        .collect()
}
