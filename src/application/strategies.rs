use crate::domain::models::{LineItem, Product, SellerStats};
use clap::ValueEnum;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Computes the revenue of one purchased line item.
#[cfg_attr(test, mockall::automock)]
pub trait RevenueStrategy {
    fn revenue(&self, item: &LineItem, product: &Product) -> Decimal;
}

/// Computes the bonus of the seller at `rank` (0-based) among `total` sellers.
///
/// Called once per seller, after every purchase record has been accumulated,
/// so `seller.profit` is final.
#[cfg_attr(test, mockall::automock)]
pub trait BonusStrategy {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> Decimal;
}

impl<F> RevenueStrategy for F
where
    F: Fn(&LineItem, &Product) -> Decimal,
{
    fn revenue(&self, item: &LineItem, product: &Product) -> Decimal {
        self(item, product)
    }
}

impl<F> BonusStrategy for F
where
    F: Fn(usize, usize, &SellerStats) -> Decimal,
{
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> Decimal {
        self(rank, total, seller)
    }
}

/// `sale_price * quantity * (1 - discount / 100)`. The product is not consulted.
///
/// Saturates at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscountedRevenue;

impl RevenueStrategy for DiscountedRevenue {
    fn revenue(&self, item: &LineItem, _product: &Product) -> Decimal {
        let discount_factor = Decimal::ONE - item.discount / dec!(100);
        item.sale_price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|gross| gross.checked_mul(discount_factor))
            .unwrap_or_else(|| {
                if item.sale_price.is_sign_negative() != discount_factor.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                }
            })
    }
}

/// Rank coefficient times accumulated profit.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfitBonus {
    /// Treat a negative profit as zero before applying the coefficient
    pub clamp_negative_profit: bool,
}

impl BonusStrategy for ProfitBonus {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> Decimal {
        let profit = if self.clamp_negative_profit {
            seller.profit.max(Decimal::ZERO)
        } else {
            seller.profit
        };
        bonus_coefficient(rank, total) * profit
    }
}

/// First place earns 15%, the last place nothing, second and third 10% and
/// everybody else 5%. A sole seller is first, not last.
pub fn bonus_coefficient(rank: usize, total: usize) -> Decimal {
    match rank {
        0 => dec!(0.15),
        _ if rank + 1 == total => Decimal::ZERO,
        1 | 2 => dec!(0.10),
        _ => dec!(0.05),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RevenueKind {
    #[default]
    Discounted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BonusKind {
    #[default]
    Profit,
    ProfitClamped,
}

/// Which reference strategies a run should use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub revenue: RevenueKind,
    #[serde(default)]
    pub bonus: BonusKind,
}

/// The pair of strategies handed to the aggregator.
///
/// Both slots start empty; the aggregator refuses to run until both are set.
#[derive(Default)]
pub struct Strategies {
    pub(crate) revenue: Option<Box<dyn RevenueStrategy>>,
    pub(crate) bonus: Option<Box<dyn BonusStrategy>>,
}

impl Strategies {
    pub fn new(
        revenue: impl RevenueStrategy + 'static,
        bonus: impl BonusStrategy + 'static,
    ) -> Self {
        Self::default().with_revenue(revenue).with_bonus(bonus)
    }

    /// `DiscountedRevenue` with an unclamped `ProfitBonus`.
    pub fn reference() -> Self {
        Self::from_config(&StrategyConfig::default())
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        let strategies = match config.revenue {
            RevenueKind::Discounted => Self::default().with_revenue(DiscountedRevenue),
        };
        match config.bonus {
            BonusKind::Profit => strategies.with_bonus(ProfitBonus::default()),
            BonusKind::ProfitClamped => strategies.with_bonus(ProfitBonus {
                clamp_negative_profit: true,
            }),
        }
    }

    pub fn with_revenue(mut self, revenue: impl RevenueStrategy + 'static) -> Self {
        self.revenue = Some(Box::new(revenue));
        self
    }

    pub fn with_bonus(mut self, bonus: impl BonusStrategy + 'static) -> Self {
        self.bonus = Some(Box::new(bonus));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Seller;

    fn item(quantity: u32, sale_price: Decimal, discount: Decimal) -> LineItem {
        LineItem {
            sku: "A".to_string(),
            quantity,
            sale_price,
            discount,
        }
    }

    fn product() -> Product {
        Product {
            sku: "A".to_string(),
            purchase_price: dec!(5),
        }
    }

    fn stats_with_profit(profit: Decimal) -> SellerStats {
        let mut stats = SellerStats::new(&Seller {
            id: "s1".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
        });
        stats.profit = profit;
        stats
    }

    #[test]
    fn discounted_revenue_applies_percentage() {
        let strategy = DiscountedRevenue;
        assert_eq!(strategy.revenue(&item(2, dec!(10), dec!(0)), &product()), dec!(20));
        assert_eq!(strategy.revenue(&item(3, dec!(100), dec!(25)), &product()), dec!(225));
        assert_eq!(strategy.revenue(&item(1, dec!(80), dec!(100)), &product()), dec!(0));
    }

    #[test]
    fn discounted_revenue_saturates() {
        let strategy = DiscountedRevenue;
        assert_eq!(strategy.revenue(&item(2, Decimal::MAX, dec!(0)), &product()), Decimal::MAX);
        assert_eq!(strategy.revenue(&item(2, Decimal::MIN, dec!(0)), &product()), Decimal::MIN);
    }

    #[test]
    fn coefficient_follows_rank_table() {
        assert_eq!(bonus_coefficient(0, 5), dec!(0.15));
        assert_eq!(bonus_coefficient(1, 5), dec!(0.10));
        assert_eq!(bonus_coefficient(2, 5), dec!(0.10));
        assert_eq!(bonus_coefficient(3, 5), dec!(0.05));
        assert_eq!(bonus_coefficient(4, 5), Decimal::ZERO);
    }

    #[test]
    fn last_place_wins_over_second_and_third() {
        assert_eq!(bonus_coefficient(1, 2), Decimal::ZERO);
        assert_eq!(bonus_coefficient(2, 3), Decimal::ZERO);
    }

    #[test]
    fn sole_seller_is_first() {
        assert_eq!(bonus_coefficient(0, 1), dec!(0.15));
    }

    #[test]
    fn profit_bonus_multiplies_profit() {
        let bonus = ProfitBonus::default();
        assert_eq!(bonus.bonus(0, 3, &stats_with_profit(dec!(200))), dec!(30));
        assert_eq!(bonus.bonus(0, 3, &stats_with_profit(dec!(-200))), dec!(-30));
    }

    #[test]
    fn clamped_profit_bonus_never_goes_negative() {
        let bonus = ProfitBonus {
            clamp_negative_profit: true,
        };
        assert_eq!(bonus.bonus(0, 3, &stats_with_profit(dec!(-200))), Decimal::ZERO);
        assert_eq!(bonus.bonus(1, 3, &stats_with_profit(dec!(200))), dec!(20));
    }

    #[test]
    fn closures_are_strategies() {
        let flat = |_: &LineItem, _: &Product| dec!(7);
        let rank_only = |rank: usize, _: usize, _: &SellerStats| Decimal::from(rank);
        assert_eq!(flat.revenue(&item(1, dec!(1), dec!(0)), &product()), dec!(7));
        assert_eq!(rank_only.bonus(4, 9, &stats_with_profit(dec!(1))), dec!(4));
    }

    #[test]
    fn strategies_start_empty_and_fill_from_config() {
        let empty = Strategies::default();
        assert!(empty.revenue.is_none() && empty.bonus.is_none());

        let clamped = Strategies::from_config(&StrategyConfig {
            revenue: RevenueKind::Discounted,
            bonus: BonusKind::ProfitClamped,
        });
        let bonus = clamped.bonus.expect("bonus strategy");
        assert_eq!(bonus.bonus(0, 2, &stats_with_profit(dec!(-10))), Decimal::ZERO);
    }

    #[test]
    fn strategy_config_reads_kebab_case() {
        let config: StrategyConfig =
            serde_json::from_str(r#"{"bonus": "profit-clamped"}"#).unwrap();
        assert_eq!(config.revenue, RevenueKind::Discounted);
        assert_eq!(config.bonus, BonusKind::ProfitClamped);
    }
}
