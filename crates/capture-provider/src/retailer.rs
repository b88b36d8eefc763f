//! Retailer provider catalog and engine-code codec.
//!
//! The catalog is closed and versioned: linking a retailer the engine knows
//! but this catalog doesn't is an explicit [`CaptureError::UnsupportedProvider`]
//! outcome, never a silent default.

use capture_core::{CaptureError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Supported retailer order-history providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RetailerProvider {
    AcmeMarkets,
    Albertsons,
    Amazon,
    AmazonBeta,
    AmazonCa,
    AmazonUk,
    BedBathAndBeyond,
    BestBuy,
    BjsWholesale,
    Chewy,
    Costco,
    Cvs,
    DicksSportingGoods,
    DollarGeneral,
    DollarTree,
    DominosPizza,
    DoorDash,
    Drizly,
    FamilyDollar,
    #[serde(rename = "FOOD_4_LESS")]
    Food4Less,
    FoodLion,
    FredMeyer,
    Gap,
    GiantEagle,
    Grubhub,
    HarrisTeeter,
    Heb,
    HomeDepot,
    Hyvee,
    Instacart,
    JewelOsco,
    Kohls,
    Kroger,
    Lowes,
    Macys,
    Marshalls,
    Meijer,
    Nike,
    Postmates,
    Publix,
    Ralphs,
    RiteAid,
    Safeway,
    SamsClub,
    Seamless,
    Sephora,
    Shipt,
    Shoprite,
    Sprouts,
    Staples,
    Starbucks,
    TacoBell,
    Target,
    TjMaxx,
    UberEats,
    Ulta,
    Vons,
    Walgreens,
    Walmart,
    WalmartCa,
    Wegmans,
}

/// Every catalog entry, in catalog order.
pub const ALL_RETAILERS: [RetailerProvider; 61] = [
    RetailerProvider::AcmeMarkets,
    RetailerProvider::Albertsons,
    RetailerProvider::Amazon,
    RetailerProvider::AmazonBeta,
    RetailerProvider::AmazonCa,
    RetailerProvider::AmazonUk,
    RetailerProvider::BedBathAndBeyond,
    RetailerProvider::BestBuy,
    RetailerProvider::BjsWholesale,
    RetailerProvider::Chewy,
    RetailerProvider::Costco,
    RetailerProvider::Cvs,
    RetailerProvider::DicksSportingGoods,
    RetailerProvider::DollarGeneral,
    RetailerProvider::DollarTree,
    RetailerProvider::DominosPizza,
    RetailerProvider::DoorDash,
    RetailerProvider::Drizly,
    RetailerProvider::FamilyDollar,
    RetailerProvider::Food4Less,
    RetailerProvider::FoodLion,
    RetailerProvider::FredMeyer,
    RetailerProvider::Gap,
    RetailerProvider::GiantEagle,
    RetailerProvider::Grubhub,
    RetailerProvider::HarrisTeeter,
    RetailerProvider::Heb,
    RetailerProvider::HomeDepot,
    RetailerProvider::Hyvee,
    RetailerProvider::Instacart,
    RetailerProvider::JewelOsco,
    RetailerProvider::Kohls,
    RetailerProvider::Kroger,
    RetailerProvider::Lowes,
    RetailerProvider::Macys,
    RetailerProvider::Marshalls,
    RetailerProvider::Meijer,
    RetailerProvider::Nike,
    RetailerProvider::Postmates,
    RetailerProvider::Publix,
    RetailerProvider::Ralphs,
    RetailerProvider::RiteAid,
    RetailerProvider::Safeway,
    RetailerProvider::SamsClub,
    RetailerProvider::Seamless,
    RetailerProvider::Sephora,
    RetailerProvider::Shipt,
    RetailerProvider::Shoprite,
    RetailerProvider::Sprouts,
    RetailerProvider::Staples,
    RetailerProvider::Starbucks,
    RetailerProvider::TacoBell,
    RetailerProvider::Target,
    RetailerProvider::TjMaxx,
    RetailerProvider::UberEats,
    RetailerProvider::Ulta,
    RetailerProvider::Vons,
    RetailerProvider::Walgreens,
    RetailerProvider::Walmart,
    RetailerProvider::WalmartCa,
    RetailerProvider::Wegmans,
];

/// Catalog entry → raw linking-engine code, one pair per entry.
///
/// The codec maps are built from this single table so the two directions
/// cannot drift apart.
const ENGINE_CODES: [(RetailerProvider, u32); 61] = [
    (RetailerProvider::AcmeMarkets, 1),
    (RetailerProvider::Albertsons, 2),
    (RetailerProvider::Amazon, 3),
    (RetailerProvider::AmazonBeta, 4),
    (RetailerProvider::AmazonCa, 5),
    (RetailerProvider::AmazonUk, 6),
    (RetailerProvider::BedBathAndBeyond, 7),
    (RetailerProvider::BestBuy, 8),
    (RetailerProvider::BjsWholesale, 9),
    (RetailerProvider::Chewy, 10),
    (RetailerProvider::Costco, 11),
    (RetailerProvider::Cvs, 12),
    (RetailerProvider::DicksSportingGoods, 13),
    (RetailerProvider::DollarGeneral, 14),
    (RetailerProvider::DollarTree, 15),
    (RetailerProvider::DominosPizza, 16),
    (RetailerProvider::DoorDash, 17),
    (RetailerProvider::Drizly, 18),
    (RetailerProvider::FamilyDollar, 19),
    (RetailerProvider::Food4Less, 20),
    (RetailerProvider::FoodLion, 21),
    (RetailerProvider::FredMeyer, 22),
    (RetailerProvider::Gap, 23),
    (RetailerProvider::GiantEagle, 24),
    (RetailerProvider::Grubhub, 25),
    (RetailerProvider::HarrisTeeter, 26),
    (RetailerProvider::Heb, 27),
    (RetailerProvider::HomeDepot, 28),
    (RetailerProvider::Hyvee, 29),
    (RetailerProvider::Instacart, 30),
    (RetailerProvider::JewelOsco, 31),
    (RetailerProvider::Kohls, 32),
    (RetailerProvider::Kroger, 33),
    (RetailerProvider::Lowes, 34),
    (RetailerProvider::Macys, 35),
    (RetailerProvider::Marshalls, 36),
    (RetailerProvider::Meijer, 37),
    (RetailerProvider::Nike, 38),
    (RetailerProvider::Postmates, 39),
    (RetailerProvider::Publix, 40),
    (RetailerProvider::Ralphs, 41),
    (RetailerProvider::RiteAid, 42),
    (RetailerProvider::Safeway, 43),
    (RetailerProvider::SamsClub, 44),
    (RetailerProvider::Seamless, 45),
    (RetailerProvider::Sephora, 46),
    (RetailerProvider::Shipt, 47),
    (RetailerProvider::Shoprite, 48),
    (RetailerProvider::Sprouts, 49),
    (RetailerProvider::Staples, 50),
    (RetailerProvider::Starbucks, 51),
    (RetailerProvider::TacoBell, 52),
    (RetailerProvider::Target, 53),
    (RetailerProvider::TjMaxx, 54),
    (RetailerProvider::UberEats, 55),
    (RetailerProvider::Ulta, 56),
    (RetailerProvider::Vons, 57),
    (RetailerProvider::Walgreens, 58),
    (RetailerProvider::Walmart, 59),
    (RetailerProvider::WalmartCa, 60),
    (RetailerProvider::Wegmans, 61),
];

static ENCODE: Lazy<HashMap<RetailerProvider, u32>> =
    Lazy::new(|| ENGINE_CODES.iter().copied().collect());

static DECODE: Lazy<HashMap<u32, RetailerProvider>> =
    Lazy::new(|| ENGINE_CODES.iter().map(|&(p, c)| (c, p)).collect());

impl RetailerProvider {
    /// The raw code this catalog entry carries on the linking-engine wire.
    #[must_use]
    pub fn engine_code(self) -> u32 {
        ENCODE[&self]
    }

    /// Decode a raw linking-engine code.
    ///
    /// Unknown codes are an explicit error, never coerced to a known
    /// retailer.
    pub fn from_engine_code(code: u32) -> Result<Self> {
        DECODE.get(&code).copied().ok_or_else(|| {
            CaptureError::UnsupportedProvider(format!("retailer engine code {code}"))
        })
    }

    /// Human-readable retailer name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AcmeMarkets => "Acme Markets",
            Self::Albertsons => "Albertsons",
            Self::Amazon => "Amazon",
            Self::AmazonBeta => "Amazon (beta program)",
            Self::AmazonCa => "Amazon Canada",
            Self::AmazonUk => "Amazon UK",
            Self::BedBathAndBeyond => "Bed Bath & Beyond",
            Self::BestBuy => "Best Buy",
            Self::BjsWholesale => "BJ's Wholesale Club",
            Self::Chewy => "Chewy",
            Self::Costco => "Costco",
            Self::Cvs => "CVS",
            Self::DicksSportingGoods => "Dick's Sporting Goods",
            Self::DollarGeneral => "Dollar General",
            Self::DollarTree => "Dollar Tree",
            Self::DominosPizza => "Domino's Pizza",
            Self::DoorDash => "DoorDash",
            Self::Drizly => "Drizly",
            Self::FamilyDollar => "Family Dollar",
            Self::Food4Less => "Food 4 Less",
            Self::FoodLion => "Food Lion",
            Self::FredMeyer => "Fred Meyer",
            Self::Gap => "Gap",
            Self::GiantEagle => "Giant Eagle",
            Self::Grubhub => "Grubhub",
            Self::HarrisTeeter => "Harris Teeter",
            Self::Heb => "H-E-B",
            Self::HomeDepot => "The Home Depot",
            Self::Hyvee => "Hy-Vee",
            Self::Instacart => "Instacart",
            Self::JewelOsco => "Jewel-Osco",
            Self::Kohls => "Kohl's",
            Self::Kroger => "Kroger",
            Self::Lowes => "Lowe's",
            Self::Macys => "Macy's",
            Self::Marshalls => "Marshalls",
            Self::Meijer => "Meijer",
            Self::Nike => "Nike",
            Self::Postmates => "Postmates",
            Self::Publix => "Publix",
            Self::Ralphs => "Ralphs",
            Self::RiteAid => "Rite Aid",
            Self::Safeway => "Safeway",
            Self::SamsClub => "Sam's Club",
            Self::Seamless => "Seamless",
            Self::Sephora => "Sephora",
            Self::Shipt => "Shipt",
            Self::Shoprite => "ShopRite",
            Self::Sprouts => "Sprouts Farmers Market",
            Self::Staples => "Staples",
            Self::Starbucks => "Starbucks",
            Self::TacoBell => "Taco Bell",
            Self::Target => "Target",
            Self::TjMaxx => "T.J. Maxx",
            Self::UberEats => "Uber Eats",
            Self::Ulta => "Ulta Beauty",
            Self::Vons => "Vons",
            Self::Walgreens => "Walgreens",
            Self::Walmart => "Walmart",
            Self::WalmartCa => "Walmart Canada",
            Self::Wegmans => "Wegmans",
        }
    }
}

impl fmt::Display for RetailerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Verify the codec tables cover the catalog exactly once in each direction.
///
/// Run at SDK initialization so a catalog edit that breaks the pairing fails
/// loudly instead of misrouting a retailer.
pub fn validate_codec() -> Result<()> {
    if ENCODE.len() != ALL_RETAILERS.len() {
        return Err(CaptureError::UnsupportedProvider(format!(
            "retailer encode table has {} entries for {} catalog values",
            ENCODE.len(),
            ALL_RETAILERS.len()
        )));
    }
    if DECODE.len() != ENGINE_CODES.len() {
        return Err(CaptureError::UnsupportedProvider(
            "duplicate raw code in retailer table".to_string(),
        ));
    }
    for provider in ALL_RETAILERS {
        let code = *ENCODE.get(&provider).ok_or_else(|| {
            CaptureError::UnsupportedProvider(format!("{provider} missing from encode table"))
        })?;
        if RetailerProvider::from_engine_code(code)? != provider {
            return Err(CaptureError::UnsupportedProvider(format!(
                "{provider} does not round-trip through code {code}"
            )));
        }
    }
    Ok(())
}
