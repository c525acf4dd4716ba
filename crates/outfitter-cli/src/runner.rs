//! Runs parsed script commands against the session.
//!
//! Every line produces exactly one JSON response. Rejections are reported
//! in the response and never stop the script.

use std::io::{self, BufRead, Write};

use outfitter_core::error::DomainError;
use outfitter_core::item::ItemId;
use outfitter_core::observer::SlotObserver;
use outfitter_inventory::application::query_handlers::{InventoryView, view_inventory};
use outfitter_session::application::dispatcher::{Outcome, dispatch};
use outfitter_session::application::exchange::ExchangeKind;
use outfitter_session::domain::commands::{
    ActivateItem, BeginExchange, EndExchange, InputEvent, SlotRef,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::script::{ScriptCommand, Target, parse_line};
use crate::state::AppState;

/// Response written for one script line.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Response {
    /// A drag began.
    DragStarted {
        /// The dragged slot.
        slot: SlotRef,
    },
    /// A drop completed an exchange.
    Exchanged {
        /// Shape of the exchange.
        kind: ExchangeKind,
        /// Slot the drag started from.
        source: SlotRef,
        /// Slot the stack was dropped on.
        destination: SlotRef,
    },
    /// One unit was bought.
    Bought {
        /// The item bought.
        item: ItemId,
        /// Coins debited.
        price: u32,
        /// Balance afterwards.
        balance: u32,
    },
    /// One unit was sold.
    Sold {
        /// The item sold.
        item: ItemId,
        /// Coins credited.
        price: u32,
        /// Balance afterwards.
        balance: u32,
    },
    /// The line had nothing to act on.
    Ignored,
    /// A shop was opened.
    ShopOpened {
        /// The shop id.
        shop: String,
        /// Listing inventory of the shop.
        listing: Uuid,
    },
    /// The open shop, if any, was closed.
    ShopClosed {
        /// Id of the shop that was closed.
        shop: Option<String>,
    },
    /// Contents of an inventory.
    Inventory(InventoryView),
    /// Current balance.
    Coins {
        /// The balance.
        coins: u32,
    },
    /// Shops that can be opened.
    Shops {
        /// Sorted shop ids.
        ids: Vec<String>,
    },
    /// The line was rejected.
    Rejected(ErrorBody),
}

impl From<Outcome> for Response {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::DragStarted(slot) => Self::DragStarted { slot },
            Outcome::Exchanged(receipt) => Self::Exchanged {
                kind: receipt.kind,
                source: receipt.source,
                destination: receipt.destination,
            },
            Outcome::Bought(receipt) => Self::Bought {
                item: receipt.item,
                price: receipt.price,
                balance: receipt.balance,
            },
            Outcome::Sold(receipt) => Self::Sold {
                item: receipt.item,
                price: receipt.price,
                balance: receipt.balance,
            },
            Outcome::Ignored => Self::Ignored,
        }
    }
}

fn inventory_id(state: &AppState, target: Target) -> Result<Uuid, DomainError> {
    match target {
        Target::Player => Ok(state.player_id),
        Target::Wardrobe => Ok(state.wardrobe_id),
        Target::Shop => state
            .session
            .shop_listing_id()
            .ok_or_else(|| DomainError::Validation("no shop is open".to_string())),
    }
}

fn slot_ref(state: &AppState, target: Target, slot: usize) -> Result<SlotRef, DomainError> {
    Ok(SlotRef::new(inventory_id(state, target)?, slot))
}

/// Runs one command. Domain rejections are returned as
/// `Response::Rejected`.
pub fn execute(
    state: &mut AppState,
    command: &ScriptCommand,
    observer: &mut dyn SlotObserver,
) -> Response {
    match try_execute(state, command, observer) {
        Ok(response) => response,
        Err(err) => Response::Rejected(ErrorBody::from(&err)),
    }
}

fn try_execute(
    state: &mut AppState,
    command: &ScriptCommand,
    observer: &mut dyn SlotObserver,
) -> Result<Response, DomainError> {
    let correlation_id = Uuid::new_v4();
    let event = match command {
        ScriptCommand::Drag(target, slot) => InputEvent::BeginExchange(BeginExchange {
            correlation_id,
            source: slot_ref(state, *target, *slot)?,
        }),
        ScriptCommand::Drop(destination) => {
            let source = state.session.dragging().ok_or_else(|| {
                DomainError::InvalidExchange("no drag in progress".to_string())
            })?;
            let destination = match destination {
                Some((target, slot)) => match slot_ref(state, *target, *slot) {
                    Ok(slot) => Some(slot),
                    Err(err) => {
                        // A drop always ends the drag, even onto a missing slot.
                        state.session.take_drag();
                        return Err(err);
                    }
                },
                None => None,
            };
            InputEvent::EndExchange(EndExchange {
                correlation_id,
                source,
                destination,
            })
        }
        ScriptCommand::Click(target, slot) => InputEvent::ActivateItem(ActivateItem {
            correlation_id,
            slot: slot_ref(state, *target, *slot)?,
        }),
        ScriptCommand::Open(shop_id) => return open_shop(state, shop_id, observer),
        ScriptCommand::Close => {
            let closed = state.session.unregister_active_shop_inventory(observer);
            return Ok(Response::ShopClosed {
                shop: closed.map(|catalog| catalog.id),
            });
        }
        ScriptCommand::Show(target) => {
            let id = inventory_id(state, *target)?;
            return Ok(Response::Inventory(view_inventory(state.session.inventory(id)?)));
        }
        ScriptCommand::Coins => {
            return Ok(Response::Coins {
                coins: state.session.coins(),
            });
        }
        ScriptCommand::Shops => {
            return Ok(Response::Shops {
                ids: state.shops.ids().into_iter().map(str::to_string).collect(),
            });
        }
    };

    let outcome = dispatch(&mut state.session, &event, &mut state.store, observer)?;
    Ok(outcome.into())
}

fn open_shop(
    state: &mut AppState,
    shop_id: &str,
    observer: &mut dyn SlotObserver,
) -> Result<Response, DomainError> {
    let catalog = state
        .shops
        .get(shop_id)
        .cloned()
        .ok_or_else(|| DomainError::Validation(format!("no shop named '{shop_id}'")))?;
    let listing = state
        .session
        .register_active_shop_inventory(catalog, observer)?;
    Ok(Response::ShopOpened {
        shop: shop_id.to_string(),
        listing,
    })
}

/// Runs every line of `input`, writing one JSON response per command to
/// `output`, then saves the counts.
///
/// # Errors
///
/// Returns `AppError::Io` if reading or writing fails and `AppError::Domain`
/// if the save file cannot be written.
pub fn run_script(
    state: &mut AppState,
    input: impl BufRead,
    mut output: impl Write,
    observer: &mut dyn SlotObserver,
) -> Result<usize, AppError> {
    let mut executed = 0;
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let response = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => {
                executed += 1;
                execute(state, &command, observer)
            }
            Err(err) => {
                warn!(line = number + 1, error = %err, "Skipping unparseable line");
                Response::Rejected(ErrorBody {
                    error: "input_error",
                    message: err.to_string(),
                })
            }
        };
        serde_json::to_writer(&mut output, &response).map_err(io::Error::from)?;
        writeln!(output)?;
    }
    output.flush()?;
    state.save()?;
    info!(executed, "Script finished");
    Ok(executed)
}
