//! Inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::command::MenuAction;
use crate::domain::SymbolTable;

const COINS_PER_ROW: usize = 3;

fn button(label: &str, action: &MenuAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label.to_string(), action.as_data())
}

/// Main menu: choose coin, get advice, history.
#[must_use]
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![button("🔍 Choose coin", &MenuAction::ChooseCoin)],
        vec![button("🧠 Get advice", &MenuAction::Advise)],
        vec![button("📜 History", &MenuAction::History)],
    ])
}

/// Coin-selection menu built from the symbol table, plus a back button.
#[must_use]
pub fn coin_menu(table: &SymbolTable) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();
    let mut row = Vec::with_capacity(COINS_PER_ROW);

    for coin in table.coins() {
        row.push(button(coin, &MenuAction::SelectCoin(coin.to_string())));
        if row.len() == COINS_PER_ROW {
            rows.push(std::mem::take(&mut row));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows.push(vec![button("🏠 Main menu", &MenuAction::Back)]);

    InlineKeyboardMarkup::new(rows)
}
