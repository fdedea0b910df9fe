//! Shop economy: coins earned from league placements, a static catalog,
//! and a purchase ledger persisted through the settings store.

use crate::league::LeagueState;
use crate::storage::SettingsStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;

/// Settings-store key for the serialized ledger.
const LEDGER_KEY: &str = "purchases";

/// Item granted for free to the last-placed player of division B.
pub const CONSOLATION_ITEM: &str = "Steal Pokemon";

/// Coins paid out per final league position.
fn coins_for_position(position: u32) -> u32 {
    match position {
        1 => 12,
        2 => 11,
        3 => 9,
        4 => 8,
        5 => 9,
        6 => 6,
        7 => 5,
        8 => 4,
        9 => 2,
        _ => 0,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ShopItem {
    pub name: &'static str,
    pub price: u32,
    pub blurb: &'static str,
}

/// The catalog: league wildcards plus battle berries.
pub fn catalog() -> &'static [ShopItem] {
    const ITEMS: &[ShopItem] = &[
        ShopItem { name: "Revive Pokemon", price: 10, blurb: "Bring a fainted team member back to the league" },
        ShopItem { name: "Steal Pokemon", price: 10, blurb: "Claim a Pokemon from another trainer's box" },
        ShopItem { name: "Recapture", price: 8, blurb: "Retry a failed capture" },
        ShopItem { name: "Extra Capture", price: 5, blurb: "One additional capture this route" },
        ShopItem { name: "Shield Pokemon", price: 10, blurb: "Protect one Pokemon from theft" },
        ShopItem { name: "Fossil", price: 5, blurb: "Revive an ancient Pokemon" },
        ShopItem { name: "Oran Berry", price: 1, blurb: "Restores 10 HP at half health" },
        ShopItem { name: "Sitrus Berry", price: 2, blurb: "Restores a quarter of max HP" },
        ShopItem { name: "Cheri Berry", price: 1, blurb: "Cures paralysis" },
        ShopItem { name: "Chesto Berry", price: 1, blurb: "Cures sleep" },
        ShopItem { name: "Salac Berry", price: 2, blurb: "Raises Speed in a pinch" },
        ShopItem { name: "Liechi Berry", price: 2, blurb: "Raises Attack in a pinch" },
        ShopItem { name: "Occa Berry", price: 2, blurb: "Halves one super-effective Fire hit" },
        ShopItem { name: "Passho Berry", price: 2, blurb: "Halves one super-effective Water hit" },
    ];
    ITEMS
}

pub fn find_item(name: &str) -> Option<&'static ShopItem> {
    catalog().iter().find(|i| i.name.eq_ignore_ascii_case(name))
}

/// Errors from shop operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ShopError {
    UnknownItem(String),
    InsufficientFunds { price: u32, available: u32 },
}

impl std::fmt::Display for ShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShopError::UnknownItem(name) => write!(f, "No such item: {}", name),
            ShopError::InsufficientFunds { price, available } => {
                write!(f, "Item costs {} coins but only {} are available", price, available)
            }
        }
    }
}

impl std::error::Error for ShopError {}

/// One recorded purchase.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub user: String,
    pub item: String,
    pub price: u32,
    pub created_at: DateTime<Utc>,
}

/// Append-only list of purchases, persisted as JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PurchaseLedger {
    entries: Vec<Purchase>,
}

impl PurchaseLedger {
    pub fn load(store: &SettingsStore) -> Self {
        match store.get(LEDGER_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("stored purchase ledger is not usable: {}; starting empty", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn save(&self, store: &SettingsStore) -> io::Result<()> {
        let raw = serde_json::to_string(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        store.set(LEDGER_KEY, &raw)
    }

    pub fn add(&mut self, user: &str, item: &str, price: u32) -> &Purchase {
        self.entries.push(Purchase {
            user: user.to_string(),
            item: item.to_string(),
            price,
            created_at: Utc::now(),
        });
        // Just pushed, so the list is non-empty.
        &self.entries[self.entries.len() - 1]
    }

    pub fn total_spent(&self, user: &str) -> u32 {
        self.entries
            .iter()
            .filter(|p| p.user == user)
            .map(|p| p.price)
            .sum()
    }

    pub fn for_user(&self, user: &str) -> Vec<&Purchase> {
        self.entries.iter().filter(|p| p.user == user).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Coins a trainer has earned from finalized league splits.
pub fn coins_from_league(league: &LeagueState, user: &str) -> u32 {
    league
        .positions
        .get(user)
        .map(|splits| splits.values().map(|pos| coins_for_position(*pos)).sum())
        .unwrap_or(0)
}

/// Spendable balance: earned minus spent, floored at zero.
pub fn balance(league: &LeagueState, ledger: &PurchaseLedger, user: &str) -> u32 {
    coins_from_league(league, user).saturating_sub(ledger.total_spent(user))
}

/// Buy a catalog item, debiting the trainer's balance.
pub fn purchase(
    league: &LeagueState,
    ledger: &mut PurchaseLedger,
    user: &str,
    item_name: &str,
) -> Result<Purchase, ShopError> {
    let item = find_item(item_name).ok_or_else(|| ShopError::UnknownItem(item_name.to_string()))?;
    let available = balance(league, ledger, user);
    if item.price > available {
        return Err(ShopError::InsufficientFunds {
            price: item.price,
            available,
        });
    }
    Ok(ledger.add(user, item.name, item.price).clone())
}

/// Grant an item for free (the league's consolation wildcard).
pub fn grant(ledger: &mut PurchaseLedger, user: &str, item_name: &str) -> Purchase {
    ledger.add(user, item_name, 0).clone()
}
