use tvbridge_bravia::model::ChannelInfo;

use crate::matcher;

/// Which tuner list a channel came from. The device does not self-report
/// this, so the catalog fetcher tags records by the source it queried.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChannelKind {
    Analog,
    Digital,
}

#[derive(Clone, Debug)]
pub struct ChannelCandidate {
    pub name: Option<String>,
    pub uri: String,
    pub kind: ChannelKind,
    pub info: ChannelInfo,
}

/// A requested channel number: `12`, `12.3`, or `12-3`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChannelNumber {
    pub main: String,
    pub sub: Option<String>,
}

impl ChannelNumber {
    pub fn parse(input: &str) -> Option<Self> {
        let (main, sub) = match input.split_once(['.', '-']) {
            Some((main, sub)) => (main, Some(sub)),
            None => (input, None),
        };

        let is_digits = |s: &&str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(&main) || !sub.as_ref().is_none_or(is_digits) {
            return None;
        }

        Some(Self {
            main: main.to_string(),
            sub: sub.map(str::to_string),
        })
    }
}

/// Picks the unique visible channel for a number. Digital channels take
/// priority over an analog channel with the same main number; a bare digital
/// number selects the primary feed (sub-channel "1").
pub fn resolve_by_number<'a>(
    channels: &'a [ChannelCandidate],
    number: &ChannelNumber,
) -> Option<&'a ChannelCandidate> {
    let mut analog = None;
    let mut digital = None;

    for channel in channels.iter().filter(|channel| channel.info.visible) {
        if channel.info.channel_main != number.main {
            continue;
        }

        match channel.kind {
            // Analog broadcasts carry no sub-number. Duplicate entries with
            // the same main number keep the last one scanned.
            ChannelKind::Analog if number.sub.is_none() => analog = Some(channel),
            ChannelKind::Digital => {
                let wanted_sub = number.sub.as_deref().unwrap_or("1");
                if channel.info.channel_sub.as_deref() == Some(wanted_sub) {
                    digital = Some(channel);
                }
            }
            _ => {}
        }
    }

    digital.or(analog)
}

/// Fuzzy whole-string match over visible channel names.
pub fn resolve_by_name<'a>(
    channels: &'a [ChannelCandidate],
    query: &str,
) -> Option<&'a ChannelCandidate> {
    matcher::best_match(
        query,
        channels.iter().filter(|channel| channel.info.visible),
        |query, channel| {
            channel
                .name
                .as_deref()
                .map_or(0, |name| matcher::ratio(query, name))
        },
    )
}
