//! Status and category enums.
//!
//! Wire-level strings are bit-exact contracts with existing clients:
//! order statuses serialize as `"Pending"`, `"Preparing"`, `"Ready"`,
//! `"Collected"`, `"Cancelled"`; categories as `"Breakfast"`, `"Lunch"`,
//! `"Drinks"`, `"Snacks"`.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The legal transitions form a fixed chain with a cancellation branch:
///
/// ```text
/// Pending -> Preparing -> Ready -> Collected
///    |           |
///    +-----------+--> Cancelled
/// ```
///
/// `Collected` and `Cancelled` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Collected,
    Cancelled,
}

impl OrderStatus {
    /// All recognized status values, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Preparing,
        Self::Ready,
        Self::Collected,
        Self::Cancelled,
    ];

    /// True for states from which no further transition is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Collected | Self::Cancelled)
    }

    /// True for orders still moving through the kitchen queue.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Preparing | Self::Ready)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Preparing | Self::Cancelled)
                | (Self::Preparing, Self::Ready | Self::Cancelled)
                | (Self::Ready, Self::Collected)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::Collected => "Collected",
            Self::Cancelled => "Cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Preparing" => Ok(Self::Preparing),
            "Ready" => Ok(Self::Ready),
            "Collected" => Ok(Self::Collected),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Menu item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Breakfast,
    Lunch,
    Drinks,
    Snacks,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Drinks => "Drinks",
            Self::Snacks => "Snacks",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Breakfast" => Ok(Self::Breakfast),
            "Lunch" => Ok(Self::Lunch),
            "Drinks" => Ok(Self::Drinks),
            "Snacks" => Ok(Self::Snacks),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// Account role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Regular customer account.
    #[default]
    Customer,
    /// Kitchen staff: may drive order status forward and force-cancel.
    Staff,
    /// Canteen administration: staff powers plus menu management.
    Admin,
    /// Full access including account management.
    SuperAdmin,
}

impl AccountRole {
    /// True for roles allowed to use the admin surface.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Staff | Self::Admin | Self::SuperAdmin)
    }

    /// True for roles allowed to manage the menu.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Customer => "customer",
            Self::Staff => "staff",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(format!("invalid account role: {s}")),
        }
    }
}
