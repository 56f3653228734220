//! Distribution engine: fixed-percentage split of a revenue request's
//! total across users, transporters, government, and the recycler.
//!
//! Pure computation: the approval transaction in the revenue service feeds
//! it the locked collection rows and applies the resulting plan with
//! atomic wallet increments.

use std::collections::BTreeMap;
use std::str::FromStr;

use uuid::Uuid;

pub const USER_POOL_RATE: f64 = 0.40;
pub const TRANSPORTER_POOL_RATE: f64 = 0.30;
pub const GOVERNMENT_POOL_RATE: f64 = 0.30;

/// How each stakeholder pool is divided among its members.
///
/// The original system divided pools equally across distinct stakeholders
/// regardless of contribution; `Proportional` weights each member by the
/// revenue their collections contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitPolicy {
    #[default]
    Equal,
    Proportional,
}

impl FromStr for SplitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equal" => Ok(SplitPolicy::Equal),
            "proportional" => Ok(SplitPolicy::Proportional),
            other => Err(format!("unknown split policy: {other}")),
        }
    }
}

/// One collection's contribution to a revenue request.
#[derive(Debug, Clone)]
pub struct StakeholderSlice {
    pub user_id: Uuid,
    pub transporter_id: Uuid,
    pub revenue: f64,
}

/// The computed split, ready to apply inside the approval transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionPlan {
    pub total_user_share: f64,
    pub total_transporter_share: f64,
    pub municipality_share: f64,
    pub central_gov_share: f64,
    pub recycler_share: f64,
    /// Wallet credit per distinct user, deterministic iteration order.
    pub user_credits: BTreeMap<Uuid, f64>,
    /// Wallet credit per distinct transporter.
    pub transporter_credits: BTreeMap<Uuid, f64>,
}

/// Compute the split of `total_revenue` over the given collection slices.
///
/// User pool is 0.40·R, transporter pool 0.30·R, government pool 0.30·R
/// (half municipality, half central government). The recycler share is the
/// residual after the three pools, so rounding error lands there instead
/// of being created or destroyed. A pool with no participants allocates
/// nothing and its value flows into the residual.
pub fn plan_distribution(
    total_revenue: f64,
    slices: &[StakeholderSlice],
    policy: SplitPolicy,
) -> DistributionPlan {
    let user_pool = USER_POOL_RATE * total_revenue;
    let transporter_pool = TRANSPORTER_POOL_RATE * total_revenue;
    let government_pool = GOVERNMENT_POOL_RATE * total_revenue;

    let user_credits = divide_pool(
        user_pool,
        slices.iter().map(|s| (s.user_id, s.revenue)),
        policy,
    );
    let transporter_credits = divide_pool(
        transporter_pool,
        slices.iter().map(|s| (s.transporter_id, s.revenue)),
        policy,
    );

    let total_user_share: f64 = user_credits.values().sum();
    let total_transporter_share: f64 = transporter_credits.values().sum();
    let recycler_share =
        total_revenue - total_user_share - total_transporter_share - government_pool;

    DistributionPlan {
        total_user_share,
        total_transporter_share,
        municipality_share: government_pool / 2.0,
        central_gov_share: government_pool / 2.0,
        recycler_share,
        user_credits,
        transporter_credits,
    }
}

fn divide_pool(
    pool: f64,
    contributions: impl Iterator<Item = (Uuid, f64)>,
    policy: SplitPolicy,
) -> BTreeMap<Uuid, f64> {
    let mut totals: BTreeMap<Uuid, f64> = BTreeMap::new();
    for (id, revenue) in contributions {
        *totals.entry(id).or_insert(0.0) += revenue;
    }
    if totals.is_empty() {
        return totals;
    }

    let contributed: f64 = totals.values().sum();
    let count = totals.len() as f64;

    match policy {
        SplitPolicy::Equal => totals.keys().map(|id| (*id, pool / count)).collect(),
        // Fall back to equal shares when nothing was contributed (all-zero
        // prices), so the pool is still fully allocated.
        SplitPolicy::Proportional if contributed <= 0.0 => {
            totals.keys().map(|id| (*id, pool / count)).collect()
        }
        SplitPolicy::Proportional => totals
            .into_iter()
            .map(|(id, revenue)| (id, pool * revenue / contributed))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(user: Uuid, transporter: Uuid, revenue: f64) -> StakeholderSlice {
        StakeholderSlice {
            user_id: user,
            transporter_id: transporter,
            revenue,
        }
    }

    #[test]
    fn split_of_100_is_40_30_15_15_0() {
        let user = Uuid::new_v4();
        let transporter = Uuid::new_v4();
        let plan = plan_distribution(
            100.0,
            &[slice(user, transporter, 100.0)],
            SplitPolicy::Equal,
        );

        assert_eq!(plan.total_user_share, 40.0);
        assert_eq!(plan.total_transporter_share, 30.0);
        assert_eq!(plan.municipality_share, 15.0);
        assert_eq!(plan.central_gov_share, 15.0);
        assert!(plan.recycler_share.abs() < 1e-9);
        assert_eq!(plan.user_credits[&user], 40.0);
        assert_eq!(plan.transporter_credits[&transporter], 30.0);
    }

    #[test]
    fn equal_policy_ignores_contribution_weight() {
        let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());
        let t = Uuid::new_v4();
        let plan = plan_distribution(
            100.0,
            &[slice(u1, t, 90.0), slice(u2, t, 10.0)],
            SplitPolicy::Equal,
        );

        assert_eq!(plan.user_credits[&u1], 20.0);
        assert_eq!(plan.user_credits[&u2], 20.0);
        assert_eq!(plan.transporter_credits[&t], 30.0);
    }

    #[test]
    fn proportional_policy_weights_by_revenue() {
        let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());
        let t = Uuid::new_v4();
        let plan = plan_distribution(
            100.0,
            &[slice(u1, t, 90.0), slice(u2, t, 10.0)],
            SplitPolicy::Proportional,
        );

        assert!((plan.user_credits[&u1] - 36.0).abs() < 1e-9);
        assert!((plan.user_credits[&u2] - 4.0).abs() < 1e-9);
        assert!((plan.transporter_credits[&t] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn same_user_across_collections_is_credited_once() {
        let u = Uuid::new_v4();
        let (t1, t2) = (Uuid::new_v4(), Uuid::new_v4());
        let plan = plan_distribution(
            50.0,
            &[slice(u, t1, 25.0), slice(u, t2, 25.0)],
            SplitPolicy::Equal,
        );

        assert_eq!(plan.user_credits.len(), 1);
        assert_eq!(plan.user_credits[&u], 20.0);
        assert_eq!(plan.transporter_credits.len(), 2);
        assert_eq!(plan.transporter_credits[&t1], 7.5);
        assert_eq!(plan.transporter_credits[&t2], 7.5);
    }

    #[test]
    fn residual_absorbs_what_pools_do_not_allocate() {
        // No slices at all: both pools are empty, everything but the
        // government pool falls through to the recycler.
        let plan = plan_distribution(100.0, &[], SplitPolicy::Equal);
        assert_eq!(plan.total_user_share, 0.0);
        assert_eq!(plan.total_transporter_share, 0.0);
        assert_eq!(plan.recycler_share, 70.0);
    }

    #[test]
    fn zero_revenue_yields_zero_everywhere() {
        let u = Uuid::new_v4();
        let t = Uuid::new_v4();
        let plan = plan_distribution(0.0, &[slice(u, t, 0.0)], SplitPolicy::Proportional);

        assert_eq!(plan.total_user_share, 0.0);
        assert_eq!(plan.total_transporter_share, 0.0);
        assert_eq!(plan.municipality_share, 0.0);
        assert_eq!(plan.recycler_share, 0.0);
    }

    #[test]
    fn shares_always_sum_to_total() {
        let (u1, u2, u3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let (t1, t2) = (Uuid::new_v4(), Uuid::new_v4());
        let slices = [
            slice(u1, t1, 33.33),
            slice(u2, t1, 11.11),
            slice(u3, t2, 55.57),
        ];
        for policy in [SplitPolicy::Equal, SplitPolicy::Proportional] {
            let plan = plan_distribution(100.01, &slices, policy);
            let sum = plan.total_user_share
                + plan.total_transporter_share
                + plan.municipality_share
                + plan.central_gov_share
                + plan.recycler_share;
            assert!((sum - 100.01).abs() < 1e-9);
        }
    }

    #[test]
    fn policy_parses_from_env_strings() {
        assert_eq!("equal".parse::<SplitPolicy>().unwrap(), SplitPolicy::Equal);
        assert_eq!(
            "Proportional".parse::<SplitPolicy>().unwrap(),
            SplitPolicy::Proportional
        );
        assert!("weighted".parse::<SplitPolicy>().is_err());
    }
}
