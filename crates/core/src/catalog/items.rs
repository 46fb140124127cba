use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::selection::LoadSize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JunkItem {
    pub id: String,
    pub label: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCategory {
    pub id: String,
    pub label: String,
    pub items: Vec<JunkItem>,
}

#[derive(Debug, Clone)]
pub struct ItemCatalog {
    categories: Vec<ItemCategory>,
    load_minimum: Decimal,
    load_eighth: Decimal,
    load_quarter: Decimal,
    load_half: Decimal,
    load_three_quarter: Decimal,
    load_full: Decimal,
}

impl ItemCatalog {
    pub fn categories(&self) -> &[ItemCategory] {
        &self.categories
    }

    pub fn item(&self, id: &str) -> Option<&JunkItem> {
        self.categories.iter().flat_map(|c| c.items.iter()).find(|item| item.id == id)
    }

    pub fn load_price(&self, size: LoadSize) -> Decimal {
        match size {
            LoadSize::Minimum => self.load_minimum,
            LoadSize::Eighth => self.load_eighth,
            LoadSize::Quarter => self.load_quarter,
            LoadSize::Half => self.load_half,
            LoadSize::ThreeQuarter => self.load_three_quarter,
            LoadSize::Full => self.load_full,
        }
    }

    pub fn load_label(size: LoadSize) -> &'static str {
        match size {
            LoadSize::Minimum => "Minimum pickup",
            LoadSize::Eighth => "1/8 truck load",
            LoadSize::Quarter => "1/4 truck load",
            LoadSize::Half => "1/2 truck load",
            LoadSize::ThreeQuarter => "3/4 truck load",
            LoadSize::Full => "Full truck load",
        }
    }

    pub const LOAD_SIZES: [LoadSize; 6] = [
        LoadSize::Minimum,
        LoadSize::Eighth,
        LoadSize::Quarter,
        LoadSize::Half,
        LoadSize::ThreeQuarter,
        LoadSize::Full,
    ];
}

fn item(id: &str, label: &str, price: i64) -> JunkItem {
    JunkItem { id: id.to_string(), label: label.to_string(), price: Decimal::from(price) }
}

fn category(id: &str, label: &str, items: Vec<JunkItem>) -> ItemCategory {
    ItemCategory { id: id.to_string(), label: label.to_string(), items }
}

pub(crate) fn item_catalog() -> ItemCatalog {
    ItemCatalog {
        categories: vec![
            category(
                "living_room",
                "Living Room",
                vec![
                    item("sofa", "Sofa", 75),
                    item("loveseat", "Loveseat", 55),
                    item("sectional", "Sectional Sofa", 125),
                    item("recliner", "Recliner", 45),
                    item("coffee_table", "Coffee Table", 30),
                    item("tv_stand", "TV Stand", 35),
                    item("entertainment_center", "Entertainment Center", 65),
                    item("bookshelf", "Bookshelf", 35),
                    item("area_rug", "Area Rug", 25),
                ],
            ),
            category(
                "bedroom",
                "Bedroom",
                vec![
                    item("mattress_twin", "Twin Mattress", 45),
                    item("mattress_full", "Full Mattress", 50),
                    item("mattress_queen", "Queen Mattress", 60),
                    item("mattress_king", "King Mattress", 75),
                    item("box_spring", "Box Spring", 40),
                    item("bed_frame", "Bed Frame", 40),
                    item("dresser", "Dresser", 55),
                    item("nightstand", "Nightstand", 25),
                    item("wardrobe", "Wardrobe", 70),
                ],
            ),
            category(
                "dining",
                "Dining Room",
                vec![
                    item("dining_table", "Dining Table", 60),
                    item("dining_chair", "Dining Chair", 15),
                    item("china_cabinet", "China Cabinet", 75),
                    item("bar_stool", "Bar Stool", 20),
                ],
            ),
            category(
                "office",
                "Office",
                vec![
                    item("desk", "Desk", 55),
                    item("office_chair", "Office Chair", 30),
                    item("file_cabinet", "File Cabinet", 35),
                    item("printer", "Printer", 20),
                ],
            ),
            category(
                "appliances",
                "Appliances",
                vec![
                    item("refrigerator", "Refrigerator", 85),
                    item("washer", "Washing Machine", 65),
                    item("dryer", "Dryer", 65),
                    item("stove", "Stove / Range", 70),
                    item("dishwasher", "Dishwasher", 55),
                    item("microwave", "Microwave", 20),
                    item("water_heater", "Water Heater", 75),
                    item("window_ac", "Window A/C Unit", 60),
                ],
            ),
            category(
                "electronics",
                "Electronics",
                vec![
                    item("tv_flat", "Flat-panel TV", 40),
                    item("tv_crt", "Tube TV", 45),
                    item("computer", "Computer Tower", 25),
                    item("monitor", "Monitor", 15),
                ],
            ),
            category(
                "outdoor",
                "Outdoor",
                vec![
                    item("grill", "Grill", 50),
                    item("patio_table", "Patio Table", 45),
                    item("patio_chair", "Patio Chair", 15),
                    item("lawn_mower", "Lawn Mower", 50),
                    item("hot_tub", "Hot Tub", 250),
                    item("swing_set", "Swing Set", 150),
                    item("trampoline", "Trampoline", 125),
                ],
            ),
            category(
                "misc",
                "Boxes & Miscellaneous",
                vec![
                    item("box_small", "Small Box", 8),
                    item("box_large", "Large Box", 12),
                    item("bagged_trash", "Bagged Trash", 10),
                    item("misc_small", "Small Misc Item", 15),
                    item("misc_large", "Large Misc Item", 35),
                ],
            ),
        ],
        load_minimum: Decimal::from(99),
        load_eighth: Decimal::from(179),
        load_quarter: Decimal::from(279),
        load_half: Decimal::from(379),
        load_three_quarter: Decimal::from(449),
        load_full: Decimal::from(549),
    }
}
