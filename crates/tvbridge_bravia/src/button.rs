use strum::{Display, EnumString};

/// Remote-control buttons the bridge can press, with their IRCC payloads.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum ButtonCode {
    Home,
    Play,
    Pause,
    Stop,
    Next,
    Prev,
    FlashPlus,
    FlashMinus,
}

impl ButtonCode {
    /// Base64 IRCC code sent in the `X_SendIRCC` SOAP body.
    pub fn ircc_code(self) -> &'static str {
        match self {
            Self::Home => "AAAAAQAAAAEAAABgAw==",
            Self::Play => "AAAAAgAAAJcAAAAaAw==",
            Self::Pause => "AAAAAgAAAJcAAAAZAw==",
            Self::Stop => "AAAAAgAAAJcAAAAYAw==",
            Self::Next => "AAAAAgAAAJcAAAA9Aw==",
            Self::Prev => "AAAAAgAAAJcAAAA8Aw==",
            Self::FlashPlus => "AAAAAgAAAJcAAAB4Aw==",
            Self::FlashMinus => "AAAAAgAAAJcAAAB5Aw==",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ircc_codes_are_base64() {
        for code in [
            ButtonCode::Home,
            ButtonCode::Play,
            ButtonCode::Pause,
            ButtonCode::Stop,
            ButtonCode::Next,
            ButtonCode::Prev,
            ButtonCode::FlashPlus,
            ButtonCode::FlashMinus,
        ] {
            assert!(code.ircc_code().ends_with("=="));
        }
    }
}
