use std::collections::BTreeMap;

use crate::{
    catalog::{CropCatalog, CropId},
    error::FarmError,
};

/// Coin purse and per-crop harvest tallies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Economy {
    coins: u32,
    harvests: BTreeMap<CropId, u32>,
}

impl Economy {
    pub fn new(starting_coins: u32, catalog: &CropCatalog) -> Self {
        Self {
            coins: starting_coins,
            harvests: catalog.iter().map(|crop| (crop.id.clone(), 0)).collect(),
        }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.coins >= amount
    }

    pub fn ensure_affordable(&self, amount: u32) -> Result<(), FarmError> {
        if self.can_afford(amount) {
            Ok(())
        } else {
            Err(FarmError::InsufficientFunds {
                needed: amount,
                available: self.coins,
            })
        }
    }

    pub fn spend(&mut self, amount: u32) -> Result<(), FarmError> {
        self.ensure_affordable(amount)?;
        self.coins -= amount;
        Ok(())
    }

    pub fn reward(&mut self, amount: u32, crop: &CropId) {
        self.coins = self.coins.saturating_add(amount);
        let tally = self.harvests.entry(crop.clone()).or_insert(0);
        *tally = tally.saturating_add(1);
    }

    pub fn harvested(&self, crop: &CropId) -> u32 {
        self.harvests.get(crop).copied().unwrap_or(0)
    }

    pub fn harvests(&self) -> &BTreeMap<CropId, u32> {
        &self.harvests
    }

    pub fn total_harvested(&self) -> u64 {
        self.harvests.values().map(|count| u64::from(*count)).sum()
    }
}
