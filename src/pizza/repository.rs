//! Pizza repository contract and its SQLite implementation.
//!
//! Every operation is one unit of work: a transaction is opened, the
//! operation runs, and the transaction commits. Early returns drop the
//! transaction, which rolls it back.
//!
//! Writes begin with `BEGIN IMMEDIATE`: concurrent writers wait on the
//! connection's busy timeout and the last one to commit wins.

use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

use crate::db::DbResult;

use super::model::{Pizza, PizzaId};

const PIZZA_SELECT_SQL: &str = "SELECT Id, Name, Description FROM Pizzas";

/// CRUD operations over pizza records.
///
/// `None` from `get`, `update` or `delete` means no record has that id.
pub trait PizzaRepository {
    /// All records, in store order
    fn list(&self) -> DbResult<Vec<Pizza>>;

    /// Persist `candidate` under a fresh id, ignoring `candidate.id`
    fn create(&self, candidate: &Pizza) -> DbResult<Pizza>;

    fn get(&self, id: PizzaId) -> DbResult<Option<Pizza>>;

    /// Overwrite name and description, returning the updated record
    fn update(&self, id: PizzaId, patch: &Pizza) -> DbResult<Option<Pizza>>;

    /// Remove the record, returning what was removed
    fn delete(&self, id: PizzaId) -> DbResult<Option<Pizza>>;
}

/// SQLite-backed pizza repository borrowing a request-scoped connection
pub struct SqlitePizzaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePizzaRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PizzaRepository for SqlitePizzaRepository<'_> {
    fn list(&self) -> DbResult<Vec<Pizza>> {
        let tx = self.conn.unchecked_transaction()?;
        let pizzas = {
            let mut stmt = tx.prepare(PIZZA_SELECT_SQL)?;
            let rows = stmt.query_map([], parse_pizza_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        tx.commit()?;

        tracing::debug!(count = pizzas.len(), "event=pizza_list status=ok");
        Ok(pizzas)
    }

    fn create(&self, candidate: &Pizza) -> DbResult<Pizza> {
        let tx = begin_write(self.conn)?;
        tx.execute(
            "INSERT INTO Pizzas (Name, Description) VALUES (?1, ?2);",
            params![candidate.name, candidate.description],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(id, "event=pizza_create status=ok");
        Ok(Pizza {
            id,
            name: candidate.name.clone(),
            description: candidate.description.clone(),
        })
    }

    fn get(&self, id: PizzaId) -> DbResult<Option<Pizza>> {
        let tx = self.conn.unchecked_transaction()?;
        let pizza = find(&tx, id)?;
        tx.commit()?;
        Ok(pizza)
    }

    fn update(&self, id: PizzaId, patch: &Pizza) -> DbResult<Option<Pizza>> {
        let tx = begin_write(self.conn)?;
        let Some(mut pizza) = find(&tx, id)? else {
            tracing::debug!(id, "event=pizza_update status=not_found");
            return Ok(None);
        };

        pizza.apply(patch);
        tx.execute(
            "UPDATE Pizzas SET Name = ?1, Description = ?2 WHERE Id = ?3;",
            params![pizza.name, pizza.description, pizza.id],
        )?;
        tx.commit()?;

        tracing::debug!(id, "event=pizza_update status=ok");
        Ok(Some(pizza))
    }

    fn delete(&self, id: PizzaId) -> DbResult<Option<Pizza>> {
        let tx = begin_write(self.conn)?;
        let Some(pizza) = find(&tx, id)? else {
            tracing::debug!(id, "event=pizza_delete status=not_found");
            return Ok(None);
        };

        tx.execute("DELETE FROM Pizzas WHERE Id = ?1;", params![id])?;
        tx.commit()?;

        tracing::debug!(id, "event=pizza_delete status=ok");
        Ok(Some(pizza))
    }
}

fn begin_write(conn: &Connection) -> DbResult<Transaction<'_>> {
    Ok(Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?)
}

fn find(conn: &Connection, id: PizzaId) -> DbResult<Option<Pizza>> {
    let pizza = conn
        .query_row(
            &format!("{PIZZA_SELECT_SQL} WHERE Id = ?1;"),
            params![id],
            parse_pizza_row,
        )
        .optional()?;
    Ok(pizza)
}

fn parse_pizza_row(row: &Row<'_>) -> rusqlite::Result<Pizza> {
    Ok(Pizza {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}
