use async_trait::async_trait;
use log::{debug, error};
use std::sync::Arc;

use tickerbook_core::errors::{DatabaseError, Error};
use tickerbook_core::positions::{ClosedPosition, ClosedPositionRepositoryTrait};
use tickerbook_core::Result;

use super::model::ClosedPositionRow;
use crate::db::{read_table, write_table, StorePaths, WriteHandle};
use crate::purchases::PurchaseRow;

pub struct ClosedPositionRepository {
    paths: Arc<StorePaths>,
    writer: WriteHandle,
}

impl ClosedPositionRepository {
    pub fn new(paths: Arc<StorePaths>, writer: WriteHandle) -> Self {
        ClosedPositionRepository { paths, writer }
    }
}

#[async_trait]
impl ClosedPositionRepositoryTrait for ClosedPositionRepository {
    fn list(&self) -> Result<Vec<ClosedPosition>> {
        let rows = read_table::<ClosedPositionRow>(&self.paths.closed_positions)?;
        Ok(rows.into_iter().map(ClosedPosition::from).collect())
    }

    async fn settle(&self, closed: ClosedPosition) -> Result<ClosedPosition> {
        self.writer
            .exec(move |paths: &StorePaths| -> Result<ClosedPosition> {
                let mut purchases = read_table::<PurchaseRow>(&paths.purchases)?;
                let index = purchases
                    .iter()
                    .position(|row| row.id == closed.id)
                    .ok_or_else(|| Error::not_found(format!("purchase {}", closed.id)))?;

                let mut closed_rows = read_table::<ClosedPositionRow>(&paths.closed_positions)?;
                if closed_rows.iter().any(|row| row.id == closed.id) {
                    return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                        "closed position {}",
                        closed.id
                    ))));
                }
                closed_rows.push(ClosedPositionRow::from(closed.clone()));

                // Closed ledger first, so a crash between the two renames never
                // loses the purchase. A failed purchases write is rolled back.
                write_table(&paths.closed_positions, &closed_rows)?;
                purchases.remove(index);
                if let Err(e) = write_table(&paths.purchases, &purchases) {
                    closed_rows.pop();
                    if let Err(restore) = write_table(&paths.closed_positions, &closed_rows) {
                        error!(
                            "Could not roll back closed position {} after a failed settle: {}",
                            closed.id, restore
                        );
                    }
                    return Err(e);
                }

                debug!("Settled purchase {}", closed.id);
                Ok(closed)
            })
            .await
    }

    async fn remove(&self, position_id: &str) -> Result<usize> {
        let position_id = position_id.to_string();
        self.writer
            .exec(move |paths: &StorePaths| -> Result<usize> {
                let mut rows = read_table::<ClosedPositionRow>(&paths.closed_positions)?;
                let before = rows.len();
                rows.retain(|row| row.id != position_id);
                let removed = before - rows.len();
                if removed > 0 {
                    write_table(&paths.closed_positions, &rows)?;
                }
                Ok(removed)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init, spawn_writer};
    use crate::purchases::PurchaseRepository;
    use chrono::NaiveDate;
    use tickerbook_core::purchases::{ActivePurchase, PurchaseRepositoryTrait};

    fn purchase(id: &str) -> ActivePurchase {
        ActivePurchase {
            id: id.to_string(),
            name: "INFY".to_string(),
            buy_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            buy_price: 1500.0,
            target_price: 1800.0,
            quantity: 4,
        }
    }

    fn closed(id: &str, percent_gain: f64, annualized: Option<f64>) -> ClosedPosition {
        ClosedPosition {
            id: id.to_string(),
            name: "INFY".to_string(),
            buy_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            buy_price: 1500.0,
            quantity: 4,
            buy_value: 6000.0,
            sell_date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            sell_price: 1650.0,
            sell_value: 6600.0,
            gain: 600.0,
            days_held: 73,
            percent_gain,
            annualized_gain_percent: annualized,
        }
    }

    fn repositories(dir: &tempfile::TempDir) -> (PurchaseRepository, ClosedPositionRepository) {
        let paths = Arc::new(init(dir.path()).unwrap());
        let writer = spawn_writer((*paths).clone());
        (
            PurchaseRepository::new(paths.clone(), writer.clone()),
            ClosedPositionRepository::new(paths, writer),
        )
    }

    #[tokio::test]
    async fn test_settle_moves_row_between_files() {
        let dir = tempfile::tempdir().unwrap();
        let (purchases, positions) = repositories(&dir);
        purchases.append(purchase("a")).await.unwrap();
        purchases.append(purchase("b")).await.unwrap();

        positions.settle(closed("a", 10.0, Some(50.0))).await.unwrap();

        let active: Vec<String> = purchases.list().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(active, vec!["b".to_string()]);
        assert_eq!(positions.list().unwrap(), vec![closed("a", 10.0, Some(50.0))]);
    }

    #[tokio::test]
    async fn test_settling_twice_fails_once() {
        let dir = tempfile::tempdir().unwrap();
        let (purchases, positions) = repositories(&dir);
        purchases.append(purchase("a")).await.unwrap();

        let (first, second) = tokio::join!(
            positions.settle(closed("a", 10.0, Some(50.0))),
            positions.settle(closed("a", 10.0, Some(50.0))),
        );

        assert_eq!(
            [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
            1
        );
        let failure = first.err().or(second.err()).unwrap();
        assert!(failure.is_not_found());
        assert_eq!(positions.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_absent_optional_and_infinity_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let (purchases, positions) = repositories(&dir);
        purchases.append(purchase("a")).await.unwrap();
        purchases.append(purchase("b")).await.unwrap();

        positions.settle(closed("a", f64::INFINITY, None)).await.unwrap();
        positions.settle(closed("b", 0.0, Some(0.0))).await.unwrap();

        let contents = std::fs::read_to_string(dir.path().join("closed_positions.csv")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert!(lines[1].ends_with(",73,inf,"));
        assert!(lines[2].ends_with(",73,0.0,0.0"));

        let read = positions.list().unwrap();
        assert_eq!(read[0].percent_gain, f64::INFINITY);
        assert_eq!(read[0].annualized_gain_percent, None);
        assert_eq!(read[1].annualized_gain_percent, Some(0.0));
    }

    #[tokio::test]
    async fn test_remove_reports_rows_removed() {
        let dir = tempfile::tempdir().unwrap();
        let (purchases, positions) = repositories(&dir);
        purchases.append(purchase("a")).await.unwrap();
        positions.settle(closed("a", 10.0, Some(50.0))).await.unwrap();

        assert_eq!(positions.remove("a").await.unwrap(), 1);
        assert_eq!(positions.remove("a").await.unwrap(), 0);
        assert!(positions.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_purchases_write_rolls_back_settle() {
        let dir = tempfile::tempdir().unwrap();
        let (purchases, positions) = repositories(&dir);
        purchases.append(purchase("a")).await.unwrap();
        let purchases_file = dir.path().join("purchases.csv");
        let closed_file = dir.path().join("closed_positions.csv");
        let purchases_before = std::fs::read_to_string(&purchases_file).unwrap();
        let closed_before = std::fs::read_to_string(&closed_file).unwrap();

        // A directory in place of the temp file makes the purchases rewrite fail.
        let blocker = dir.path().join("purchases.csv.tmp");
        std::fs::create_dir(&blocker).unwrap();

        let result = positions.settle(closed("a", 10.0, Some(50.0))).await;
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&purchases_file).unwrap(), purchases_before);
        assert_eq!(std::fs::read_to_string(&closed_file).unwrap(), closed_before);
        assert!(positions.list().unwrap().is_empty());

        std::fs::remove_dir(&blocker).unwrap();
        positions.settle(closed("a", 10.0, Some(50.0))).await.unwrap();
        assert!(purchases.list().unwrap().is_empty());
        assert_eq!(positions.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_settle_rejects_id_already_closed() {
        let dir = tempfile::tempdir().unwrap();
        let (purchases, positions) = repositories(&dir);
        purchases.append(purchase("a")).await.unwrap();
        positions.settle(closed("a", 10.0, Some(50.0))).await.unwrap();

        purchases.append(purchase("a")).await.unwrap();
        let err = positions.settle(closed("a", 20.0, None)).await.unwrap_err();

        assert!(matches!(err, Error::Database(DatabaseError::UniqueViolation(_))));
        assert_eq!(purchases.list().unwrap().len(), 1);
        assert_eq!(positions.list().unwrap(), vec![closed("a", 10.0, Some(50.0))]);
    }
}
