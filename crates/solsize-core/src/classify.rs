//! Oversize classification against the protocol limits

use crate::error::{Error, Result};
use crate::limits::{DEPLOYED_SIZE_LIMIT, INIT_SIZE_LIMIT};
use crate::size::SizeRecord;

/// How close a size is to its limit. `Near` kicks in above 90% of the
/// limit; used by the presentation layer for warning coloration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    Ok,
    Near,
    Over,
}

/// Classify a size against a limit
pub fn proximity(size: usize, limit: usize) -> Proximity {
    if size > limit {
        Proximity::Over
    } else if size as f64 > limit as f64 * 0.9 {
        Proximity::Near
    } else {
        Proximity::Ok
    }
}

fn is_oversized<T: SizeRecord>(record: &T) -> bool {
    record.deploy_size() > DEPLOYED_SIZE_LIMIT || record.init_size() > INIT_SIZE_LIMIT
}

/// Number of records exceeding either limit. A record over both limits
/// counts once.
pub fn count_oversized<T: SizeRecord>(records: &[T]) -> usize {
    records.iter().filter(|r| is_oversized(*r)).count()
}

/// Fail when any record exceeds a limit. Whether this is fatal (strict
/// mode) or advisory is the caller's decision.
pub fn validate_no_oversized<T: SizeRecord>(records: &[T]) -> Result<()> {
    let count = count_oversized(records);
    if count == 0 {
        return Ok(());
    }

    Err(Error::Oversized {
        count,
        over_deployed: records
            .iter()
            .filter(|r| r.deploy_size() > DEPLOYED_SIZE_LIMIT)
            .count(),
        over_init: records
            .iter()
            .filter(|r| r.init_size() > INIT_SIZE_LIMIT)
            .count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SolcSettings;
    use crate::size::ContractSize;

    fn record(deploy_size: usize, init_size: usize) -> ContractSize {
        ContractSize {
            source_name: String::new(),
            contract_name: String::new(),
            deploy_size,
            init_size,
            solc_settings: SolcSettings::unknown(),
        }
    }

    #[test]
    fn test_count_oversized_at_and_over_limits() {
        let records = vec![
            record(DEPLOYED_SIZE_LIMIT, INIT_SIZE_LIMIT),
            record(DEPLOYED_SIZE_LIMIT + 1, INIT_SIZE_LIMIT),
            record(DEPLOYED_SIZE_LIMIT, INIT_SIZE_LIMIT + 1),
            record(DEPLOYED_SIZE_LIMIT + 1, INIT_SIZE_LIMIT + 1),
        ];

        // sizes exactly at the limit are not oversized
        assert_eq!(count_oversized(&records), 3);
    }

    #[test]
    fn test_validate_passes_within_limits() {
        assert!(validate_no_oversized::<ContractSize>(&[]).is_ok());
        assert!(validate_no_oversized(&[record(DEPLOYED_SIZE_LIMIT, INIT_SIZE_LIMIT)]).is_ok());
    }

    #[test]
    fn test_validate_fails_when_oversized() {
        let err =
            validate_no_oversized(&[record(DEPLOYED_SIZE_LIMIT + 1, INIT_SIZE_LIMIT)]).unwrap_err();
        assert!(matches!(
            err,
            Error::Oversized {
                count: 1,
                over_deployed: 1,
                over_init: 0,
            }
        ));

        assert!(validate_no_oversized(&[record(0, INIT_SIZE_LIMIT + 1)]).is_err());
    }

    #[test]
    fn test_proximity_buckets() {
        assert_eq!(proximity(0, DEPLOYED_SIZE_LIMIT), Proximity::Ok);
        assert_eq!(proximity(DEPLOYED_SIZE_LIMIT, DEPLOYED_SIZE_LIMIT), Proximity::Near);
        assert_eq!(proximity(22119, DEPLOYED_SIZE_LIMIT), Proximity::Near);
        assert_eq!(proximity(22118, DEPLOYED_SIZE_LIMIT), Proximity::Ok);
        assert_eq!(proximity(DEPLOYED_SIZE_LIMIT + 1, DEPLOYED_SIZE_LIMIT), Proximity::Over);
    }
}
