//! Command handlers for the Inventory context.
//!
//! Each handler checks the command targets the given inventory, runs the
//! domain operation and drains the notifications it produced.

use outfitter_core::error::DomainError;
use outfitter_core::persistence::CountStore;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::aggregates::Inventory;
use crate::domain::commands::{GainItem, LoseItem, SwitchSlots};
use crate::domain::events::InventoryEvent;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct InventoryCommandResult {
    /// The inventory affected by the command.
    pub inventory_id: Uuid,
    /// Notifications produced by the command, in order.
    pub events: Vec<InventoryEvent>,
}

fn ensure_target(inventory_id: Uuid, inventory: &Inventory) -> Result<(), DomainError> {
    if inventory.id == inventory_id {
        Ok(())
    } else {
        Err(DomainError::InventoryNotFound(inventory_id))
    }
}

fn drain(inventory: &mut Inventory) -> InventoryCommandResult {
    InventoryCommandResult {
        inventory_id: inventory.id,
        events: inventory.take_uncommitted_events(),
    }
}

/// Handles the `GainItem` command.
///
/// # Errors
///
/// Returns `DomainError::InventoryNotFound` if the command targets another
/// inventory, otherwise whatever `Inventory::gain_item_amount` returns.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, inventory_id = %command.inventory_id))]
pub fn handle_gain_item(
    command: &GainItem,
    inventory: &mut Inventory,
    store: &mut dyn CountStore,
) -> Result<InventoryCommandResult, DomainError> {
    ensure_target(command.inventory_id, inventory)?;
    let slot_index = inventory.gain_item_amount(&command.item, command.amount, store)?;
    info!(item = %command.item, amount = command.amount, slot_index, "Item gained");
    Ok(drain(inventory))
}

/// Handles the `LoseItem` command.
///
/// # Errors
///
/// Returns `DomainError::InventoryNotFound` if the command targets another
/// inventory, otherwise whatever `Inventory::lose_item_amount` returns.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, inventory_id = %command.inventory_id))]
pub fn handle_lose_item(
    command: &LoseItem,
    inventory: &mut Inventory,
    store: &mut dyn CountStore,
) -> Result<InventoryCommandResult, DomainError> {
    ensure_target(command.inventory_id, inventory)?;
    let remaining = inventory.lose_item_amount(&command.item, command.amount, store)?;
    info!(item = %command.item, amount = command.amount, remaining, "Item lost");
    Ok(drain(inventory))
}

/// Handles the `SwitchSlots` command.
///
/// # Errors
///
/// Returns `DomainError::InventoryNotFound` if the command targets another
/// inventory, otherwise whatever `Inventory::try_switch_slots` returns.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, inventory_id = %command.inventory_id))]
pub fn handle_switch_slots(
    command: &SwitchSlots,
    inventory: &mut Inventory,
) -> Result<InventoryCommandResult, DomainError> {
    ensure_target(command.inventory_id, inventory)?;
    inventory.try_switch_slots(command.slot_a, command.slot_b)?;
    info!(
        slot_a = command.slot_a,
        slot_b = command.slot_b,
        "Slots switched"
    );
    Ok(drain(inventory))
}
