//! Economy ledger: per-guild, per-user accounts with transactional
//! updates. Balances never go negative; multi-row updates (transfers)
//! commit atomically or not at all.

use rusqlite::{OptionalExtension, params};
use serenity::model::id::{GuildId, UserId};
use thiserror::Error;

use super::Database;

/// Balance granted to a freshly registered account.
pub const STARTING_BALANCE: i64 = 100;

#[derive(Error, Debug)]
pub enum EconomyError {
    #[error("you don't have an account yet; use `register` first")]
    NoAccount,

    #[error("that user doesn't have an account")]
    NoRecipientAccount,

    #[error("you already have an account")]
    AccountExists,

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("payday is on cooldown for another {remaining} seconds")]
    OnCooldown { remaining: i64 },

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

pub type EconomyResult<T> = Result<T, EconomyError>;

impl Database {
    /// Open a new account with [`STARTING_BALANCE`] credits.
    pub fn open_account(&self, guild_id: GuildId, user_id: UserId) -> EconomyResult<i64> {
        let conn = self.lock();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO economy_accounts (guild_id, user_id, balance) VALUES (?1, ?2, ?3)",
            params![guild_id.get() as i64, user_id.get() as i64, STARTING_BALANCE],
        )?;
        if inserted == 0 {
            return Err(EconomyError::AccountExists);
        }
        Ok(STARTING_BALANCE)
    }

    /// Current balance, or [`EconomyError::NoAccount`].
    pub fn balance(&self, guild_id: GuildId, user_id: UserId) -> EconomyResult<i64> {
        let conn = self.lock();
        conn.query_row(
            "SELECT balance FROM economy_accounts WHERE guild_id = ?1 AND user_id = ?2",
            params![guild_id.get() as i64, user_id.get() as i64],
            |row| row.get(0),
        )
        .optional()?
        .ok_or(EconomyError::NoAccount)
    }

    /// Apply a signed delta to a balance, rejecting overdrafts. Returns the
    /// new balance. Used by the slot machine to settle a spin in one step.
    pub fn adjust_balance(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        delta: i64,
    ) -> EconomyResult<i64> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let balance: i64 = tx
            .query_row(
                "SELECT balance FROM economy_accounts WHERE guild_id = ?1 AND user_id = ?2",
                params![guild_id.get() as i64, user_id.get() as i64],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(EconomyError::NoAccount)?;
        let new_balance = balance + delta;
        if new_balance < 0 {
            return Err(EconomyError::InsufficientFunds);
        }
        tx.execute(
            "UPDATE economy_accounts SET balance = ?3 WHERE guild_id = ?1 AND user_id = ?2",
            params![guild_id.get() as i64, user_id.get() as i64, new_balance],
        )?;
        tx.commit()?;
        Ok(new_balance)
    }

    /// Move credits between two accounts in a single transaction. Returns
    /// the sender's new balance.
    pub fn transfer(
        &self,
        guild_id: GuildId,
        from: UserId,
        to: UserId,
        amount: i64,
    ) -> EconomyResult<i64> {
        if amount <= 0 {
            return Err(EconomyError::InvalidAmount);
        }
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let from_balance: i64 = tx
            .query_row(
                "SELECT balance FROM economy_accounts WHERE guild_id = ?1 AND user_id = ?2",
                params![guild_id.get() as i64, from.get() as i64],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(EconomyError::NoAccount)?;
        if from_balance < amount {
            return Err(EconomyError::InsufficientFunds);
        }
        let credited = tx.execute(
            "UPDATE economy_accounts SET balance = balance + ?3 WHERE guild_id = ?1 AND user_id = ?2",
            params![guild_id.get() as i64, to.get() as i64, amount],
        )?;
        if credited == 0 {
            return Err(EconomyError::NoRecipientAccount);
        }
        tx.execute(
            "UPDATE economy_accounts SET balance = balance - ?3 WHERE guild_id = ?1 AND user_id = ?2",
            params![guild_id.get() as i64, from.get() as i64, amount],
        )?;
        tx.commit()?;
        Ok(from_balance - amount)
    }

    /// Claim a payday stipend. `now` is a unix timestamp; the claim is
    /// rejected while the per-guild cooldown has not elapsed.
    pub fn payday(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        amount: i64,
        cooldown_secs: i64,
        now: i64,
    ) -> EconomyResult<i64> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let row: Option<(i64, i64)> = tx
            .query_row(
                "SELECT balance, last_payday FROM economy_accounts
                 WHERE guild_id = ?1 AND user_id = ?2",
                params![guild_id.get() as i64, user_id.get() as i64],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (balance, last_payday) = row.ok_or(EconomyError::NoAccount)?;
        let elapsed = now - last_payday;
        if elapsed < cooldown_secs {
            return Err(EconomyError::OnCooldown {
                remaining: cooldown_secs - elapsed,
            });
        }
        tx.execute(
            "UPDATE economy_accounts SET balance = balance + ?3, last_payday = ?4
             WHERE guild_id = ?1 AND user_id = ?2",
            params![guild_id.get() as i64, user_id.get() as i64, amount, now],
        )?;
        tx.commit()?;
        Ok(balance + amount)
    }

    /// Highest balances in the guild, richest first.
    pub fn top_balances(&self, guild_id: GuildId, limit: u32) -> EconomyResult<Vec<(u64, i64)>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT user_id, balance FROM economy_accounts
             WHERE guild_id = ?1 ORDER BY balance DESC, user_id ASC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![guild_id.get() as i64, limit], |row| {
            Ok((row.get::<_, i64>(0)? as u64, row.get::<_, i64>(1)?))
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GUILD: GuildId = GuildId::new(1);
    const ALICE: UserId = UserId::new(10);
    const BOB: UserId = UserId::new(20);

    fn db() -> Database {
        Database::open_in_memory().expect("in-memory db")
    }

    #[test]
    fn register_then_balance() {
        let db = db();
        assert_eq!(db.open_account(GUILD, ALICE).unwrap(), STARTING_BALANCE);
        assert_eq!(db.balance(GUILD, ALICE).unwrap(), STARTING_BALANCE);
    }

    #[test]
    fn double_register_is_rejected() {
        let db = db();
        db.open_account(GUILD, ALICE).unwrap();
        assert!(matches!(
            db.open_account(GUILD, ALICE),
            Err(EconomyError::AccountExists)
        ));
    }

    #[test]
    fn balance_without_account() {
        let db = db();
        assert!(matches!(
            db.balance(GUILD, ALICE),
            Err(EconomyError::NoAccount)
        ));
    }

    #[test]
    fn accounts_are_per_guild() {
        let db = db();
        db.open_account(GUILD, ALICE).unwrap();
        assert!(matches!(
            db.balance(GuildId::new(2), ALICE),
            Err(EconomyError::NoAccount)
        ));
    }

    #[test]
    fn transfer_moves_funds_atomically() {
        let db = db();
        db.open_account(GUILD, ALICE).unwrap();
        db.open_account(GUILD, BOB).unwrap();
        let remaining = db.transfer(GUILD, ALICE, BOB, 40).unwrap();
        assert_eq!(remaining, STARTING_BALANCE - 40);
        assert_eq!(db.balance(GUILD, BOB).unwrap(), STARTING_BALANCE + 40);
    }

    #[test]
    fn transfer_rejects_overdraft() {
        let db = db();
        db.open_account(GUILD, ALICE).unwrap();
        db.open_account(GUILD, BOB).unwrap();
        assert!(matches!(
            db.transfer(GUILD, ALICE, BOB, STARTING_BALANCE + 1),
            Err(EconomyError::InsufficientFunds)
        ));
        // Nothing moved.
        assert_eq!(db.balance(GUILD, ALICE).unwrap(), STARTING_BALANCE);
        assert_eq!(db.balance(GUILD, BOB).unwrap(), STARTING_BALANCE);
    }

    #[test]
    fn transfer_requires_recipient_account() {
        let db = db();
        db.open_account(GUILD, ALICE).unwrap();
        assert!(matches!(
            db.transfer(GUILD, ALICE, BOB, 10),
            Err(EconomyError::NoRecipientAccount)
        ));
        assert_eq!(db.balance(GUILD, ALICE).unwrap(), STARTING_BALANCE);
    }

    #[test]
    fn transfer_rejects_nonpositive_amounts() {
        let db = db();
        db.open_account(GUILD, ALICE).unwrap();
        db.open_account(GUILD, BOB).unwrap();
        for amount in [0, -5] {
            assert!(matches!(
                db.transfer(GUILD, ALICE, BOB, amount),
                Err(EconomyError::InvalidAmount)
            ));
        }
    }

    #[test]
    fn payday_grants_then_cools_down() {
        let db = db();
        db.open_account(GUILD, ALICE).unwrap();
        let new_balance = db.payday(GUILD, ALICE, 120, 300, 1_000).unwrap();
        assert_eq!(new_balance, STARTING_BALANCE + 120);
        match db.payday(GUILD, ALICE, 120, 300, 1_100) {
            Err(EconomyError::OnCooldown { remaining }) => assert_eq!(remaining, 200),
            other => panic!("expected cooldown, got {other:?}"),
        }
        // Cooldown elapsed.
        assert_eq!(
            db.payday(GUILD, ALICE, 120, 300, 1_300).unwrap(),
            STARTING_BALANCE + 240
        );
    }

    #[test]
    fn adjust_balance_rejects_overdraft() {
        let db = db();
        db.open_account(GUILD, ALICE).unwrap();
        assert_eq!(db.adjust_balance(GUILD, ALICE, -30).unwrap(), 70);
        assert!(matches!(
            db.adjust_balance(GUILD, ALICE, -100),
            Err(EconomyError::InsufficientFunds)
        ));
        assert_eq!(db.balance(GUILD, ALICE).unwrap(), 70);
    }

    #[test]
    fn leaderboard_orders_richest_first() {
        let db = db();
        db.open_account(GUILD, ALICE).unwrap();
        db.open_account(GUILD, BOB).unwrap();
        db.adjust_balance(GUILD, BOB, 50).unwrap();
        let top = db.top_balances(GUILD, 10).unwrap();
        assert_eq!(
            top,
            vec![
                (BOB.get(), STARTING_BALANCE + 50),
                (ALICE.get(), STARTING_BALANCE)
            ]
        );
    }
}
