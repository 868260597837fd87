//! Fungible token surface and its in-memory implementation.
//!
//! The governance engine never models token-standard edge cases itself; it
//! talks to tokens only through [`FungibleToken`]. Insufficient balance and
//! allowance are reported as errors, never clamped.

use std::collections::{HashMap, HashSet};
use std::fmt;

use agora_types::{Address, Amount};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Token roles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub enum Role {
    /// May grant roles
    Admin,
    /// May mint new supply
    Minter,
    /// May burn any holder's balance
    Burner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "ADMIN",
            Role::Minter => "MINTER_ROLE",
            Role::Burner => "BURNER_ROLE",
        };
        f.write_str(name)
    }
}

/// Capability surface consumed from token collaborators.
pub trait FungibleToken {
    /// Contract address of the token.
    fn address(&self) -> Address;

    fn total_supply(&self) -> Amount;

    fn balance_of(&self, account: &Address) -> Amount;

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// Move `amount` from `from` to `to`, authorised by `from`.
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError>;

    fn approve(&mut self, owner: Address, spender: Address, amount: Amount) -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to` against the allowance granted to `spender`.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    fn mint(&mut self, caller: Address, to: Address, amount: Amount) -> Result<(), TokenError>;

    fn burn(&mut self, caller: Address, owner: Address, amount: Amount) -> Result<(), TokenError>;

    fn has_role(&self, role: Role, account: &Address) -> bool;

    fn grant_role(&mut self, caller: Address, role: Role, account: Address) -> Result<(), TokenError>;
}

/// In-memory role-based fungible token.
#[derive(Debug, Clone)]
pub struct Erc20Token {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Token decimals
    pub decimals: u8,
    address: Address,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    roles: HashMap<Role, HashSet<Address>>,
}

impl Erc20Token {
    /// Create a token whose `admin` holds every role.
    pub fn new(name: &str, symbol: &str, decimals: u8, address: Address, admin: Address) -> Self {
        let mut roles: HashMap<Role, HashSet<Address>> = HashMap::new();
        for role in [Role::Admin, Role::Minter, Role::Burner] {
            roles.entry(role).or_default().insert(admin);
        }

        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            address,
            total_supply: 0,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            roles,
        }
    }

    /// Create a token and mint `initial_supply` to `admin`.
    pub fn with_initial_supply(
        name: &str,
        symbol: &str,
        decimals: u8,
        address: Address,
        admin: Address,
        initial_supply: Amount,
    ) -> Self {
        let mut token = Self::new(name, symbol, decimals, address, admin);
        if initial_supply > 0 {
            token.balances.insert(admin, initial_supply);
            token.total_supply = initial_supply;
        }
        token
    }

    fn require_role(&self, role: Role, account: &Address) -> Result<(), TokenError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(TokenError::MissingRole {
                role: role.to_string(),
                account: *account,
            })
        }
    }

    fn set_balance(&mut self, account: Address, balance: Amount) {
        if balance == 0 {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        if amount == 0 {
            return Err(TokenError::InvalidAmount);
        }

        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }
        if from == to {
            return Ok(());
        }

        let to_balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.set_balance(from, from_balance - amount);
        self.set_balance(to, to_balance);
        Ok(())
    }
}

impl FungibleToken for Erc20Token {
    fn address(&self) -> Address {
        self.address
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        self.move_balance(from, to, amount)?;
        tracing::trace!(token = %self.symbol, %from, %to, amount, "transfer");
        Ok(())
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: Amount) -> Result<(), TokenError> {
        if spender.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        if amount == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let current = self.allowance(&from, &spender);
        if current < amount {
            return Err(TokenError::InsufficientAllowance {
                have: current,
                need: amount,
            });
        }

        self.move_balance(from, to, amount)?;
        self.approve(from, spender, current - amount)?;
        tracing::trace!(token = %self.symbol, %spender, %from, %to, amount, "transfer_from");
        Ok(())
    }

    fn mint(&mut self, caller: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        self.require_role(Role::Minter, &caller)?;
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        if amount == 0 {
            return Err(TokenError::InvalidAmount);
        }

        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.total_supply = supply;
        self.set_balance(to, balance);
        Ok(())
    }

    fn burn(&mut self, caller: Address, owner: Address, amount: Amount) -> Result<(), TokenError> {
        self.require_role(Role::Burner, &caller)?;
        if amount == 0 {
            return Err(TokenError::InvalidAmount);
        }

        let balance = self.balance_of(&owner);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                have: balance,
                need: amount,
            });
        }
        self.total_supply -= amount;
        self.set_balance(owner, balance - amount);
        Ok(())
    }

    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.roles
            .get(&role)
            .map(|members| members.contains(account))
            .unwrap_or(false)
    }

    fn grant_role(&mut self, caller: Address, role: Role, account: Address) -> Result<(), TokenError> {
        self.require_role(Role::Admin, &caller)?;
        self.roles.entry(role).or_default().insert(account);
        Ok(())
    }
}
