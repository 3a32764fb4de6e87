//! Checking parsed calls and turning them into item descriptions.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::parser::{ArgValue, Argument, Call, ItemCall};
use crate::model::{DatePart, TimeGranularity};

/// Separator between entity links and the element name, e.g. `listing__country`.
pub const DUNDER: &str = "__";

/// The object an item call refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QueryItemType {
    Dimension,
    TimeDimension,
    Entity,
    Metric,
}

impl QueryItemType {
    pub const ALL: [QueryItemType; 4] = [
        QueryItemType::Dimension,
        QueryItemType::TimeDimension,
        QueryItemType::Entity,
        QueryItemType::Metric,
    ];

    /// Name used in object builder text.
    pub fn name(&self) -> &'static str {
        match self {
            QueryItemType::Dimension => "Dimension",
            QueryItemType::TimeDimension => "TimeDimension",
            QueryItemType::Entity => "Entity",
            QueryItemType::Metric => "Metric",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|item| item.name() == name)
    }

    /// Parameters in positional order.
    pub fn parameters(&self) -> &'static [&'static str] {
        match self {
            QueryItemType::Dimension | QueryItemType::Entity => &["name", "entity_path"],
            QueryItemType::TimeDimension => &[
                "name",
                "time_granularity_name",
                "entity_path",
                "date_part_name",
            ],
            QueryItemType::Metric => &["name", "group_by"],
        }
    }
}

impl fmt::Display for QueryItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A method that can be chained after an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemMethod {
    Grain,
    DatePart,
    Descending,
}

impl ItemMethod {
    pub fn name(&self) -> &'static str {
        match self {
            ItemMethod::Grain => "grain",
            ItemMethod::DatePart => "date_part",
            ItemMethod::Descending => "descending",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [ItemMethod::Grain, ItemMethod::DatePart, ItemMethod::Descending]
            .into_iter()
            .find(|method| method.name() == name)
    }
}

/// Which methods each item type accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMethodMapping {
    methods: HashMap<QueryItemType, Vec<ItemMethod>>,
}

impl ValidMethodMapping {
    pub fn new(methods: HashMap<QueryItemType, Vec<ItemMethod>>) -> Self {
        Self { methods }
    }

    pub fn allowed(&self, item_type: QueryItemType) -> &[ItemMethod] {
        self.methods.get(&item_type).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for ValidMethodMapping {
    fn default() -> Self {
        let methods = HashMap::from([
            (
                QueryItemType::Dimension,
                vec![ItemMethod::Grain, ItemMethod::DatePart, ItemMethod::Descending],
            ),
            (QueryItemType::TimeDimension, vec![ItemMethod::Descending]),
            (QueryItemType::Entity, vec![ItemMethod::Descending]),
            (QueryItemType::Metric, vec![ItemMethod::Descending]),
        ]);
        Self { methods }
    }
}

/// Everything object builder text says about one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectBuilderItemDescription {
    pub item_type: QueryItemType,
    pub element_name: String,
    /// Entity links from the dundered name (`listing__created_at` → `["listing"]`)
    pub entity_links: Vec<String>,
    pub entity_path: Vec<String>,
    pub time_granularity: Option<TimeGranularity>,
    pub date_part: Option<DatePart>,
    pub group_by: Vec<String>,
    pub descending: Option<bool>,
}

impl ObjectBuilderItemDescription {
    /// The dundered name as written, e.g. `listing__created_at`.
    pub fn qualified_name(&self) -> String {
        self.entity_links
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.element_name.as_str()))
            .collect::<Vec<_>>()
            .join(DUNDER)
    }
}

pub(super) fn describe(
    call: &ItemCall,
    valid_methods: &ValidMethodMapping,
) -> Result<ObjectBuilderItemDescription, String> {
    let item_type = QueryItemType::from_name(&call.item.name).ok_or_else(|| {
        let known: Vec<_> = QueryItemType::ALL.iter().map(|i| i.name()).collect();
        format!(
            "unknown item `{}`; expected one of {}",
            call.item.name,
            known.join(", ")
        )
    })?;

    let mut args = bind_arguments(item_type, &call.item.args)?;

    let name = match args.remove("name") {
        Some(ArgValue::Str(name)) => name,
        Some(other) => return Err(format!("`name` must be a string, got a {}", other.kind())),
        None => return Err(format!("{} requires a name", item_type)),
    };
    let (entity_links, element_name) = split_dundered_name(&name)?;

    let mut description = ObjectBuilderItemDescription {
        item_type,
        element_name,
        entity_links,
        entity_path: take_list(&mut args, "entity_path")?,
        time_granularity: take_str(&mut args, "time_granularity_name")?
            .map(|g| parse_granularity(&g))
            .transpose()?,
        date_part: take_str(&mut args, "date_part_name")?
            .map(|p| parse_date_part(&p))
            .transpose()?,
        group_by: take_list(&mut args, "group_by")?,
        descending: None,
    };

    let mut seen = Vec::new();
    for method_call in &call.methods {
        let method = ItemMethod::from_name(&method_call.name)
            .filter(|method| valid_methods.allowed(item_type).contains(method))
            .ok_or_else(|| {
                format!(
                    "`{}` is not a valid method for {}",
                    method_call.name, item_type
                )
            })?;
        if seen.contains(&method) {
            return Err(format!("`{}` can only be called once", method.name()));
        }
        seen.push(method);

        let value = single_argument(method_call)?;
        match (method, value) {
            (ItemMethod::Grain, ArgValue::Str(g)) => {
                description.time_granularity = Some(parse_granularity(g)?);
            }
            (ItemMethod::DatePart, ArgValue::Str(p)) => {
                description.date_part = Some(parse_date_part(p)?);
            }
            (ItemMethod::Descending, ArgValue::Bool(b)) => {
                description.descending = Some(*b);
            }
            (method, value) => {
                return Err(format!(
                    "`{}` does not accept a {} argument",
                    method.name(),
                    value.kind()
                ));
            }
        }
    }

    Ok(description)
}

/// Match positional and keyword arguments to the item's parameters.
fn bind_arguments(
    item_type: QueryItemType,
    args: &[Argument],
) -> Result<HashMap<&'static str, ArgValue>, String> {
    let parameters = item_type.parameters();
    let mut bound = HashMap::new();
    let mut seen_keyword = false;

    for (position, arg) in args.iter().enumerate() {
        let parameter = match &arg.name {
            Some(name) => {
                seen_keyword = true;
                parameters
                    .iter()
                    .copied()
                    .find(|p| *p == name.as_str())
                    .ok_or_else(|| format!("{} has no argument `{}`", item_type, name))?
            }
            None if seen_keyword => {
                return Err("positional argument follows keyword argument".to_string());
            }
            None => parameters.get(position).copied().ok_or_else(|| {
                format!(
                    "{} takes at most {} arguments",
                    item_type,
                    parameters.len()
                )
            })?,
        };

        if bound.insert(parameter, arg.value.clone()).is_some() {
            return Err(format!("argument `{}` given more than once", parameter));
        }
    }

    Ok(bound)
}

fn take_str(args: &mut HashMap<&'static str, ArgValue>, key: &str) -> Result<Option<String>, String> {
    match args.remove(key) {
        None => Ok(None),
        Some(ArgValue::Str(s)) => Ok(Some(s)),
        Some(other) => Err(format!("`{}` must be a string, got a {}", key, other.kind())),
    }
}

fn take_list(args: &mut HashMap<&'static str, ArgValue>, key: &str) -> Result<Vec<String>, String> {
    match args.remove(key) {
        None => Ok(Vec::new()),
        Some(ArgValue::List(items)) => Ok(items),
        Some(other) => Err(format!(
            "`{}` must be a list of strings, got a {}",
            key,
            other.kind()
        )),
    }
}

fn single_argument(call: &Call) -> Result<&ArgValue, String> {
    match call.args.as_slice() {
        [Argument { name: None, value }] => Ok(value),
        _ => Err(format!("`{}` takes exactly one positional argument", call.name)),
    }
}

fn parse_granularity(name: &str) -> Result<TimeGranularity, String> {
    TimeGranularity::from_str(name).ok_or_else(|| {
        let names: Vec<_> = TimeGranularity::ALL.iter().map(|g| g.value()).collect();
        format!(
            "`{}` is not a valid time granularity; expected one of {}",
            name,
            names.join(", ")
        )
    })
}

fn parse_date_part(name: &str) -> Result<DatePart, String> {
    DatePart::from_str(name).ok_or_else(|| format!("`{}` is not a valid date part", name))
}

/// `listing__user__country` → (`["listing", "user"]`, `"country"`)
fn split_dundered_name(name: &str) -> Result<(Vec<String>, String), String> {
    let mut parts: Vec<String> = name.split(DUNDER).map(str::to_string).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(format!("`{}` is not a valid name", name));
    }
    let element_name = parts.pop().unwrap_or_default();
    Ok((parts, element_name))
}
