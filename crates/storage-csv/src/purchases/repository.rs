use async_trait::async_trait;
use std::sync::Arc;

use tickerbook_core::errors::{DatabaseError, Error};
use tickerbook_core::purchases::{ActivePurchase, PurchaseRepositoryTrait};
use tickerbook_core::Result;

use super::model::PurchaseRow;
use crate::db::{read_table, write_table, StorePaths, WriteHandle};

pub struct PurchaseRepository {
    paths: Arc<StorePaths>,
    writer: WriteHandle,
}

impl PurchaseRepository {
    pub fn new(paths: Arc<StorePaths>, writer: WriteHandle) -> Self {
        PurchaseRepository { paths, writer }
    }
}

#[async_trait]
impl PurchaseRepositoryTrait for PurchaseRepository {
    fn list(&self) -> Result<Vec<ActivePurchase>> {
        let rows = read_table::<PurchaseRow>(&self.paths.purchases)?;
        Ok(rows.into_iter().map(ActivePurchase::from).collect())
    }

    fn get_by_id(&self, purchase_id: &str) -> Result<ActivePurchase> {
        read_table::<PurchaseRow>(&self.paths.purchases)?
            .into_iter()
            .find(|row| row.id == purchase_id)
            .map(ActivePurchase::from)
            .ok_or_else(|| Error::not_found(format!("purchase {}", purchase_id)))
    }

    async fn append(&self, purchase: ActivePurchase) -> Result<ActivePurchase> {
        self.writer
            .exec(move |paths: &StorePaths| -> Result<ActivePurchase> {
                let mut rows = read_table::<PurchaseRow>(&paths.purchases)?;
                if rows.iter().any(|row| row.id == purchase.id) {
                    return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                        "purchase {}",
                        purchase.id
                    ))));
                }
                rows.push(PurchaseRow::from(purchase.clone()));
                write_table(&paths.purchases, &rows)?;
                Ok(purchase)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init, spawn_writer};
    use chrono::NaiveDate;

    fn purchase(id: &str, target_price: f64) -> ActivePurchase {
        ActivePurchase {
            id: id.to_string(),
            name: "TCS".to_string(),
            buy_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            buy_price: 3500.25,
            target_price,
            quantity: 10,
        }
    }

    fn repository(dir: &tempfile::TempDir) -> PurchaseRepository {
        let paths = Arc::new(init(dir.path()).unwrap());
        let writer = spawn_writer((*paths).clone());
        PurchaseRepository::new(paths, writer)
    }

    #[tokio::test]
    async fn test_append_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);

        repo.append(purchase("a", 0.0)).await.unwrap();
        repo.append(purchase("b", 4000.0)).await.unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed, vec![purchase("a", 0.0), purchase("b", 4000.0)]);
        assert_eq!(repo.get_by_id("b").unwrap().target_price, 4000.0);

        let contents = std::fs::read_to_string(dir.path().join("purchases.csv")).unwrap();
        assert_eq!(
            contents.lines().next(),
            Some("id,name,buyDate,buyPrice,targetPrice,quantity")
        );
        assert_eq!(contents.lines().nth(1), Some("a,TCS,2024-03-15,3500.25,0.0,10"));
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);

        repo.append(purchase("a", 0.0)).await.unwrap();
        let err = repo.append(purchase("a", 0.0)).await.unwrap_err();

        assert!(matches!(err, Error::Database(DatabaseError::UniqueViolation(_))));
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_purchase_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);
        assert!(repo.get_by_id("nope").unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);
        std::fs::write(
            dir.path().join("purchases.csv"),
            "id,name,buyDate,buyPrice,targetPrice,quantity\na,TCS,not-a-date,1,0,1\n",
        )
        .unwrap();

        let err = repo.list().unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::Malformed(_))));
    }
}
