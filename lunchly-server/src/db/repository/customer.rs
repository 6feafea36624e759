//! Customer Repository

use super::{RepoError, RepoResult, ReservationRepository};
use crate::db::executor::{Row, SharedExecutor, SqlValue};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_phone, validate_required_text,
};
use shared::models::{Customer, CustomerRanking, Reservation};

const CUSTOMER_SELECT: &str = "SELECT id, first_name, last_name, phone, notes FROM customers";

const CUSTOMER_INSERT: &str = "INSERT INTO customers (first_name, last_name, phone, notes) VALUES (?1, ?2, ?3, ?4) RETURNING id";

const CUSTOMER_UPDATE: &str = "UPDATE customers SET first_name = ?1, last_name = ?2, phone = ?3, notes = ?4 WHERE id = ?5 RETURNING id";

// Customers with zero reservations still rank (LEFT JOIN), after everyone else
const CUSTOMER_RANKING: &str = "SELECT c.id AS id, c.first_name AS first_name, c.last_name AS last_name, c.phone AS phone, c.notes AS notes, COUNT(r.id) AS reservation_count FROM customers c LEFT JOIN reservations r ON r.customer_id = c.id GROUP BY c.id ORDER BY reservation_count DESC, c.id ASC LIMIT ?1";

#[derive(Clone)]
pub struct CustomerRepository {
    executor: SharedExecutor,
    reservations: ReservationRepository,
}

impl CustomerRepository {
    pub fn new(executor: SharedExecutor) -> Self {
        let reservations = ReservationRepository::new(executor.clone());
        Self {
            executor,
            reservations,
        }
    }

    /// All customers in insertion order
    pub async fn find_all(&self) -> RepoResult<Vec<Customer>> {
        let sql = format!("{CUSTOMER_SELECT} ORDER BY id");
        let rows = self.executor.execute(&sql, &[]).await?;
        rows.iter().map(customer_from_row).collect()
    }

    pub async fn get(&self, id: i64) -> RepoResult<Customer> {
        let sql = format!("{CUSTOMER_SELECT} WHERE id = ?1");
        let rows = self.executor.execute(&sql, &[SqlValue::Integer(id)]).await?;
        match rows.first() {
            Some(row) => customer_from_row(row),
            None => Err(RepoError::NotFound(format!("Customer {id} not found"))),
        }
    }

    /// Case-insensitive substring match on first name, last name or
    /// "first last", ordered by id. Substring only: "jo" never matches
    /// "Jane Smith". Folding happens in Rust on both sides since SQLite
    /// `LOWER` / `LIKE` only fold ASCII.
    pub async fn search(&self, term: &str) -> RepoResult<Vec<Customer>> {
        let needle = term.to_lowercase();
        let customers = self.find_all().await?;
        Ok(customers
            .into_iter()
            .filter(|c| name_matches(c, &needle))
            .collect())
    }

    /// Reservations of this customer; a transient customer has none.
    pub async fn reservations(&self, customer: &Customer) -> RepoResult<Vec<Reservation>> {
        match customer.id {
            Some(id) => self.reservations.list_for_customer(id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Customers ranked by reservation count (desc), ties by id (asc)
    pub async fn top_by_reservations(&self, limit: i64) -> RepoResult<Vec<CustomerRanking>> {
        if limit < 1 {
            return Err(RepoError::Validation(format!(
                "limit must be at least 1 (got {limit})"
            )));
        }
        let rows = self
            .executor
            .execute(CUSTOMER_RANKING, &[SqlValue::Integer(limit)])
            .await?;
        rows.iter()
            .map(|row| {
                Ok(CustomerRanking {
                    customer: customer_from_row(row)?,
                    reservation_count: row.i64("reservation_count")?,
                })
            })
            .collect()
    }

    /// Insert when `id` is unset (the new id is written back), otherwise
    /// overwrite name, phone and notes. Last write wins.
    pub async fn save(&self, customer: &mut Customer) -> RepoResult<()> {
        validate(customer)?;

        match customer.id {
            None => {
                let rows = self
                    .executor
                    .execute(
                        CUSTOMER_INSERT,
                        &[
                            customer.first_name.clone().into(),
                            customer.last_name.clone().into(),
                            customer.phone.clone().into(),
                            customer.notes.clone().into(),
                        ],
                    )
                    .await?;
                let row = rows
                    .first()
                    .ok_or_else(|| RepoError::Database("Failed to create customer".into()))?;
                customer.id = Some(row.i64("id")?);
            }
            Some(id) => {
                let rows = self
                    .executor
                    .execute(
                        CUSTOMER_UPDATE,
                        &[
                            customer.first_name.clone().into(),
                            customer.last_name.clone().into(),
                            customer.phone.clone().into(),
                            customer.notes.clone().into(),
                            id.into(),
                        ],
                    )
                    .await?;
                if rows.is_empty() {
                    return Err(RepoError::NotFound(format!("Customer {id} not found")));
                }
            }
        }
        Ok(())
    }
}

fn validate(customer: &Customer) -> RepoResult<()> {
    validate_required_text(&customer.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&customer.last_name, "last_name", MAX_NAME_LEN)?;
    validate_phone(&customer.phone)?;
    validate_optional_text(&customer.notes, "notes", MAX_NOTE_LEN)
}

fn name_matches(customer: &Customer, needle: &str) -> bool {
    [
        customer.first_name.to_lowercase(),
        customer.last_name.to_lowercase(),
        customer.full_name().to_lowercase(),
    ]
    .iter()
    .any(|name| name.contains(needle))
}

fn customer_from_row(row: &Row) -> RepoResult<Customer> {
    Ok(Customer {
        id: Some(row.i64("id")?),
        first_name: row.string("first_name")?,
        last_name: row.string("last_name")?,
        phone: row.opt_string("phone")?,
        notes: row.opt_string("notes")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::{RecordingExecutor, sqlite_executor};
    use chrono::NaiveDate;

    async fn repo() -> CustomerRepository {
        CustomerRepository::new(sqlite_executor().await)
    }

    async fn add(repo: &CustomerRepository, first: &str, last: &str) -> Customer {
        let mut c = Customer::new(first, last, None, None);
        repo.save(&mut c).await.unwrap();
        c
    }

    async fn reserve(reservations: &ReservationRepository, customer_id: i64, day: u32) {
        let start_at = NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        let mut r = Reservation::new(customer_id, 2, start_at, None);
        reservations.save(&mut r).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_round_trips() {
        let repo = repo().await;
        let mut ada = Customer::new(
            "Ada",
            "Lovelace",
            Some("555-0100".into()),
            Some(String::new()),
        );
        repo.save(&mut ada).await.unwrap();
        assert_eq!(ada.id, Some(1));

        let stored = repo.get(1).await.unwrap();
        assert_eq!(stored, ada);
        assert_eq!(stored.full_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_update_changes_only_edited_field() {
        let repo = repo().await;
        let mut c = Customer::new("Grace", "Hopper", Some("555-0199".into()), Some("regular".into()));
        repo.save(&mut c).await.unwrap();
        let id = c.id;

        c.phone = Some("555-0111".into());
        repo.save(&mut c).await.unwrap();
        repo.save(&mut c).await.unwrap();
        assert_eq!(c.id, id);

        let stored = repo.get(id.unwrap()).await.unwrap();
        assert_eq!(stored.phone.as_deref(), Some("555-0111"));
        assert_eq!(stored.first_name, "Grace");
        assert_eq!(stored.last_name, "Hopper");
        assert_eq!(stored.notes.as_deref(), Some("regular"));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = repo().await;
        assert!(matches!(repo.get(999_999).await, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;
        let mut ghost = Customer::new("No", "Body", None, None);
        ghost.id = Some(42);
        assert!(matches!(repo.save(&mut ghost).await, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_all_in_insertion_order() {
        let repo = repo().await;
        assert!(repo.find_all().await.unwrap().is_empty());
        add(&repo, "Zed", "Alpha").await;
        add(&repo, "Amy", "Beta").await;
        let names: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.first_name)
            .collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = repo().await;
        let jane = add(&repo, "Jane", "Smith").await;
        let john = add(&repo, "john", "Doe").await;

        let both = repo.search("J").await.unwrap();
        assert_eq!(both, vec![jane.clone(), john.clone()]);

        assert_eq!(repo.search("jo").await.unwrap(), vec![john.clone()]);
        assert_eq!(repo.search("SMI").await.unwrap(), vec![jane.clone()]);
        assert_eq!(repo.search("jane sm").await.unwrap(), vec![jane]);
        assert!(repo.search("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let repo = repo().await;
        add(&repo, "Ada", "Lovelace").await;
        assert!(repo.search("%").await.unwrap().is_empty());
        assert!(repo.search("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reservations_delegates_to_reservation_repository() {
        let executor = sqlite_executor().await;
        let repo = CustomerRepository::new(executor.clone());
        let reservations = ReservationRepository::new(executor);

        let ada = add(&repo, "Ada", "Lovelace").await;
        let bob = add(&repo, "Bob", "Builder").await;
        reserve(&reservations, ada.id.unwrap(), 1).await;
        reserve(&reservations, ada.id.unwrap(), 2).await;
        reserve(&reservations, bob.id.unwrap(), 3).await;

        let list = repo.reservations(&ada).await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|r| r.customer_id == ada.id.unwrap()));

        let transient = Customer::new("New", "Face", None, None);
        assert!(repo.reservations(&transient).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_top_by_reservations_orders_by_count_then_id() {
        let executor = sqlite_executor().await;
        let repo = CustomerRepository::new(executor.clone());
        let reservations = ReservationRepository::new(executor);

        let a = add(&repo, "Ann", "One").await;
        let b = add(&repo, "Ben", "Two").await;
        let c = add(&repo, "Cat", "Three").await;
        let d = add(&repo, "Dan", "Four").await;
        reserve(&reservations, c.id.unwrap(), 1).await;
        reserve(&reservations, c.id.unwrap(), 2).await;
        reserve(&reservations, b.id.unwrap(), 3).await;
        reserve(&reservations, d.id.unwrap(), 4).await;

        let top = repo.top_by_reservations(10).await.unwrap();
        let ranked: Vec<_> = top
            .iter()
            .map(|r| (r.customer.id.unwrap(), r.reservation_count))
            .collect();
        assert_eq!(
            ranked,
            vec![
                (c.id.unwrap(), 2),
                (b.id.unwrap(), 1),
                (d.id.unwrap(), 1),
                (a.id.unwrap(), 0),
            ]
        );

        assert_eq!(repo.top_by_reservations(2).await.unwrap().len(), 2);
        assert!(matches!(
            repo.top_by_reservations(0).await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_customer_issues_no_statement() {
        let executor = RecordingExecutor::new();
        let repo = CustomerRepository::new(executor.clone());

        let mut blank = Customer::new("", "Lovelace", None, None);
        assert!(matches!(repo.save(&mut blank).await, Err(RepoError::Validation(_))));

        let mut bad_phone = Customer::new("Ada", "Lovelace", Some("call me".into()), None);
        bad_phone.id = Some(1);
        assert!(matches!(repo.save(&mut bad_phone).await, Err(RepoError::Validation(_))));

        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates_and_leaves_id_unset() {
        let executor = RecordingExecutor::new();
        executor.fail_with("connection refused");
        let repo = CustomerRepository::new(executor.clone());

        let mut c = Customer::new("Ada", "Lovelace", None, None);
        match repo.save(&mut c).await {
            Err(RepoError::Database(msg)) => assert_eq!(msg, "connection refused"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(c.id, None);
        assert_eq!(executor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_search_folds_accented_names() {
        let repo = repo().await;
        let emile = add(&repo, "Émile", "Álvarez").await;
        add(&repo, "Ada", "Lovelace").await;

        assert_eq!(repo.search("Álvarez").await.unwrap(), vec![emile.clone()]);
        assert_eq!(repo.search("émile").await.unwrap(), vec![emile.clone()]);
        assert_eq!(repo.search("ÉMILE").await.unwrap(), vec![emile.clone()]);
        assert_eq!(repo.search("émile álv").await.unwrap(), vec![emile]);
    }
}
