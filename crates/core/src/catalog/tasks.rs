use rust_decimal::Decimal;
use serde::Serialize;

/// One selectable value on a task's variable axis, with its price delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableOption {
    pub value: String,
    pub label: String,
    pub delta: Decimal,
}

/// A pricing axis on a task (e.g. `wallType`). At most one option per axis
/// contributes to a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskVariable {
    pub axis: String,
    pub options: Vec<VariableOption>,
}

impl TaskVariable {
    pub fn option(&self, value: &str) -> Option<&VariableOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandymanTask {
    pub id: String,
    pub name: String,
    pub category: String,
    pub base_price: Decimal,
    pub estimated_minutes: u32,
    pub variables: Vec<TaskVariable>,
}

#[derive(Debug, Clone)]
pub struct TaskCatalog {
    tasks: Vec<HandymanTask>,
    pub hourly_rate: Decimal,
    pub minimum_hours: u32,
}

impl TaskCatalog {
    pub fn task(&self, id: &str) -> Option<&HandymanTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[HandymanTask] {
        &self.tasks
    }
}

fn opt(value: &str, label: &str, delta: i64) -> VariableOption {
    VariableOption { value: value.to_string(), label: label.to_string(), delta: Decimal::from(delta) }
}

fn wall_type_axis() -> TaskVariable {
    TaskVariable {
        axis: "wallType".to_string(),
        options: vec![
            opt("drywall", "Drywall", 0),
            opt("plaster", "Plaster", 20),
            opt("brick", "Brick", 40),
            opt("concrete", "Concrete", 60),
        ],
    }
}

fn task(
    id: &str,
    name: &str,
    category: &str,
    base_price: i64,
    estimated_minutes: u32,
    variables: Vec<TaskVariable>,
) -> HandymanTask {
    HandymanTask {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        base_price: Decimal::from(base_price),
        estimated_minutes,
        variables,
    }
}

pub(crate) fn task_catalog() -> TaskCatalog {
    TaskCatalog {
        tasks: vec![
            task("tv_mount_small", "TV Mounting (up to 50\")", "mounting", 89, 60, vec![wall_type_axis()]),
            task("tv_mount_large", "TV Mounting (over 50\")", "mounting", 129, 90, vec![wall_type_axis()]),
            task(
                "shelf_install",
                "Shelf Installation",
                "mounting",
                69,
                45,
                vec![wall_type_axis()],
            ),
            task("picture_hanging", "Picture Hanging (up to 5)", "mounting", 59, 30, vec![]),
            task("ceiling_fan_install", "Ceiling Fan Installation", "electrical", 119, 90, vec![]),
            task("light_fixture_replace", "Light Fixture Replacement", "electrical", 89, 60, vec![]),
            task("smart_doorbell_install", "Smart Doorbell Installation", "electrical", 99, 45, vec![]),
            task("faucet_replace", "Faucet Replacement", "plumbing", 109, 75, vec![]),
            task("toilet_replace", "Toilet Replacement", "plumbing", 149, 90, vec![]),
            task("garbage_disposal_install", "Garbage Disposal Installation", "plumbing", 119, 75, vec![]),
            task(
                "drywall_patch",
                "Drywall Patch",
                "repair",
                85,
                60,
                vec![TaskVariable {
                    axis: "patchSize".to_string(),
                    options: vec![
                        opt("small", "Small (under 4\")", 0),
                        opt("medium", "Medium (4-12\")", 35),
                        opt("large", "Large (over 12\")", 75),
                    ],
                }],
            ),
            task("door_repair", "Interior Door Repair", "repair", 99, 60, vec![]),
            task("caulking_refresh", "Tub & Tile Caulking", "repair", 79, 60, vec![]),
            task(
                "furniture_assembly",
                "Furniture Assembly",
                "assembly",
                89,
                60,
                vec![TaskVariable {
                    axis: "complexity".to_string(),
                    options: vec![
                        opt("simple", "Simple (chair, small shelf)", 0),
                        opt("medium", "Medium (dresser, desk)", 30),
                        opt("complex", "Complex (wardrobe, bunk bed)", 70),
                    ],
                }],
            ),
        ],
        hourly_rate: Decimal::from(75),
        minimum_hours: 1,
    }
}
