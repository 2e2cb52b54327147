//! # Configuration Commands
//!
//! Drive one product configuration from opening the options view to adding
//! the result to the cart.
//!
//! ## Configuration Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open_configuration(product_id)                                        │
//! │       │  load product + catalog, empty selection                       │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────┐                                      │
//! │  │  Session (selection)         │◄── select_option / deselect_option   │
//! │  │                              │◄── clear_selection                   │
//! │  └──────────────────────────────┘                                      │
//! │       │                    │                                           │
//! │  commit_configuration   cancel_configuration                           │
//! │       │                    │                                           │
//! │       ├─ violations ──► SELECTION_REJECTED, session kept, cart untouched│
//! │       └─ valid ───────► line item in cart, session closed              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use menu_core::{
    Catalog, CommitError, LineItem, OptionGroup, ProductConfigurator, SelectOutcome,
    Selection,
};
use menu_db::Database;

use crate::commands::cart::CartResponse;
use crate::commands::menu::{display_groups, load_tenant_product};
use crate::error::ApiError;
use crate::state::{CartState, SessionState, StorefrontConfig};

/// State of one configuration session, as shown to the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationResponse {
    pub session_id: String,
    pub product_id: String,
    pub product_name: String,

    /// Option groups in display order.
    pub groups: Vec<OptionGroup>,

    /// Current picks in pick order.
    pub selection: Selection,

    /// What still blocks adding to cart; empty when committable.
    pub violations: Vec<String>,

    /// Result of the last select, when the call was a select.
    pub outcome: Option<SelectOutcome>,
}

impl ConfigurationResponse {
    fn from_configurator(
        session_id: &str,
        configurator: &ProductConfigurator,
        outcome: Option<SelectOutcome>,
    ) -> Self {
        ConfigurationResponse {
            session_id: session_id.to_string(),
            product_id: configurator.product().id.clone(),
            product_name: configurator.product().name.clone(),
            groups: display_groups(configurator.catalog().groups_in_display_order()),
            selection: configurator.selection().clone(),
            violations: configurator
                .violations()
                .iter()
                .map(|v| v.to_string())
                .collect(),
            outcome,
        }
    }
}

/// Result of a successful add-to-cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    pub item: LineItem,
    pub cart: CartResponse,
}

/// Opens a configuration session for a product.
///
/// Tenants below the tier that offers options get an empty catalog: the
/// product is sold at its base price.
pub async fn open_configuration(
    db: &Database,
    sessions: &SessionState,
    config: &StorefrontConfig,
    product_id: String,
) -> Result<ConfigurationResponse, ApiError> {
    debug!(product_id = %product_id, "open_configuration command");

    let product = load_tenant_product(db, config, &product_id).await?;

    if !product.is_active {
        return Err(ApiError::validation("Product is not available for ordering"));
    }

    let configurator = if config.access_level.can_configure_options() {
        ProductConfigurator::open(db, product).await?
    } else {
        ProductConfigurator::new(product, Catalog::empty())
    };

    let response = ConfigurationResponse::from_configurator("", &configurator, None);
    let session_id = sessions.insert(configurator)?;

    Ok(ConfigurationResponse {
        session_id,
        ..response
    })
}

/// Picks an option.
///
/// An unknown or unavailable id means the frontend is out of sync with the
/// catalog: the selection is reset and the error returned.
pub fn select_option(
    sessions: &SessionState,
    session_id: String,
    group_id: String,
    option_id: String,
) -> Result<ConfigurationResponse, ApiError> {
    debug!(
        session_id = %session_id,
        group_id = %group_id,
        option_id = %option_id,
        "select_option command"
    );

    sessions.with_session_mut(&session_id, |configurator| {
        match configurator.select(&group_id, &option_id) {
            Ok(outcome) => {
                if outcome == SelectOutcome::CapReached {
                    warn!(
                        session_id = %session_id,
                        group_id = %group_id,
                        option_id = %option_id,
                        "Group is full, selection ignored"
                    );
                }
                Ok(ConfigurationResponse::from_configurator(
                    &session_id,
                    configurator,
                    Some(outcome),
                ))
            }
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "Invalid pick, resetting selection");
                configurator.clear();
                Err(ApiError::from(err))
            }
        }
    })?
}

/// Unpicks an option. Unknown ids are ignored.
pub fn deselect_option(
    sessions: &SessionState,
    session_id: String,
    group_id: String,
    option_id: String,
) -> Result<ConfigurationResponse, ApiError> {
    debug!(
        session_id = %session_id,
        group_id = %group_id,
        option_id = %option_id,
        "deselect_option command"
    );

    sessions.with_session_mut(&session_id, |configurator| {
        configurator.deselect(&group_id, &option_id);
        ConfigurationResponse::from_configurator(&session_id, configurator, None)
    })
}

/// Drops every pick of the session.
pub fn clear_selection(
    sessions: &SessionState,
    session_id: String,
) -> Result<ConfigurationResponse, ApiError> {
    debug!(session_id = %session_id, "clear_selection command");

    sessions.with_session_mut(&session_id, |configurator| {
        configurator.clear();
        ConfigurationResponse::from_configurator(&session_id, configurator, None)
    })
}

/// Closes the options view without adding anything.
pub fn cancel_configuration(sessions: &SessionState, session_id: String) -> Result<(), ApiError> {
    debug!(session_id = %session_id, "cancel_configuration command");

    sessions.remove(&session_id).map(|_| ())
}

/// Validates the selection and, when valid, adds the priced item to the cart.
///
/// ## Behavior
/// - Violations: nothing is priced, the cart is untouched and the session
///   stays open so the user can fix the picks
/// - Success: the session is closed
///
/// ## Arguments
/// * `quantity` - Units to add (default: 1)
pub fn commit_configuration(
    sessions: &SessionState,
    cart: &CartState,
    session_id: String,
    quantity: Option<i64>,
) -> Result<CommitResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(session_id = %session_id, quantity = %quantity, "commit_configuration command");

    let result = sessions.with_session_mut(&session_id, |configurator| {
        cart.with_cart_mut(|c| configurator.commit_into(quantity, c))
    })?;

    let item = match result {
        Ok(item) => item,
        Err(err) => {
            if let CommitError::Rejected(violations) = &err {
                warn!(
                    session_id = %session_id,
                    violations = violations.len(),
                    reason = %err,
                    "Commit rejected"
                );
            }
            return Err(ApiError::from(err));
        }
    };

    sessions.remove(&session_id)?;

    info!(
        product_id = %item.product_id,
        description = %item.description,
        unit_price = %item.unit_price,
        quantity = item.quantity,
        "Line item added to cart"
    );

    Ok(CommitResponse {
        item,
        cart: cart.with_cart(|c| CartResponse::from(c)),
    })
}
