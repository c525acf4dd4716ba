//! Commands for the Session & Shop context.
//!
//! The input source delivers three logical events (`BeginExchange`,
//! `EndExchange`, `ActivateItem`); the coordinator turns them into exchange
//! and transaction commands.

use std::fmt;

use outfitter_core::command::Command;
use outfitter_core::item::ItemId;
use serde::Serialize;
use uuid::Uuid;

/// Addresses one slot of one registered inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SlotRef {
    /// The inventory identifier.
    pub inventory: Uuid,
    /// The slot index.
    pub slot: usize,
}

impl SlotRef {
    /// Creates a slot reference.
    #[must_use]
    pub fn new(inventory: Uuid, slot: usize) -> Self {
        Self { inventory, slot }
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.inventory, self.slot)
    }
}

/// The player started dragging the contents of a slot.
#[derive(Debug, Clone)]
pub struct BeginExchange {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The slot being dragged from.
    pub source: SlotRef,
}

/// The player released a drag, over a slot or over nothing.
#[derive(Debug, Clone)]
pub struct EndExchange {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The slot the drag started from.
    pub source: SlotRef,
    /// The slot under the pointer, `None` if the drop missed every slot.
    pub destination: Option<SlotRef>,
}

/// The player clicked a slot.
#[derive(Debug, Clone)]
pub struct ActivateItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The clicked slot.
    pub slot: SlotRef,
}

/// Command to move stacks between two slots.
#[derive(Debug, Clone)]
pub struct ExchangeSlots {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Slot the stack is taken from.
    pub source: SlotRef,
    /// Slot the stack is dropped on.
    pub destination: SlotRef,
}

/// Command to buy one unit from the active shop into the player inventory.
#[derive(Debug, Clone)]
pub struct BuyItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The item bought.
    pub item: ItemId,
}

/// Command to sell one unit to the active shop.
#[derive(Debug, Clone)]
pub struct SellItem {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Inventory the unit is taken from.
    pub seller: Uuid,
    /// The item sold.
    pub item: ItemId,
}

/// One input event, in delivery order.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// A drag started.
    BeginExchange(BeginExchange),
    /// A drag ended.
    EndExchange(EndExchange),
    /// A slot was clicked.
    ActivateItem(ActivateItem),
}

impl InputEvent {
    /// The command carried by this event.
    #[must_use]
    pub fn command(&self) -> &dyn Command {
        match self {
            Self::BeginExchange(command) => command,
            Self::EndExchange(command) => command,
            Self::ActivateItem(command) => command,
        }
    }
}

impl Command for BeginExchange {
    fn command_type(&self) -> &'static str {
        "session.begin_exchange"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for EndExchange {
    fn command_type(&self) -> &'static str {
        "session.end_exchange"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for ActivateItem {
    fn command_type(&self) -> &'static str {
        "session.activate_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for ExchangeSlots {
    fn command_type(&self) -> &'static str {
        "session.exchange_slots"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for BuyItem {
    fn command_type(&self) -> &'static str {
        "session.buy_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for SellItem {
    fn command_type(&self) -> &'static str {
        "session.sell_item"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
