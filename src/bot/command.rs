//! Inline-keyboard callback parsing.

/// Actions carried in callback-query data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Open the coin-selection menu.
    ChooseCoin,
    /// Select a coin as the user's current instrument.
    SelectCoin(String),
    /// Generate advice for the selected coin.
    Advise,
    /// Show the user's advice history.
    History,
    /// Return to the main menu.
    Back,
}

impl MenuAction {
    /// Callback-data payload for this action.
    #[must_use]
    pub fn as_data(&self) -> String {
        match self {
            Self::ChooseCoin => "choose_coin".into(),
            Self::SelectCoin(coin) => format!("coin:{coin}"),
            Self::Advise => "advise".into(),
            Self::History => "history".into(),
            Self::Back => "back".into(),
        }
    }
}

/// Parse callback-query data into a menu action.
///
/// Unknown payloads (from stale keyboards of older builds) parse to `None`
/// and are ignored by the handler.
#[must_use]
pub fn parse_callback(data: &str) -> Option<MenuAction> {
    match data {
        "choose_coin" => Some(MenuAction::ChooseCoin),
        "advise" => Some(MenuAction::Advise),
        "history" => Some(MenuAction::History),
        "back" => Some(MenuAction::Back),
        _ => data
            .strip_prefix("coin:")
            .filter(|coin| !coin.is_empty())
            .map(|coin| MenuAction::SelectCoin(coin.to_string())),
    }
}
