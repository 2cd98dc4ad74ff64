use itertools::Itertools;

/// Ordered sort spec for the `sort` query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortQuery(Vec<(String, Order)>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl SortQuery {
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Parses a comma-separated spec, `-` prefix for descending. Blank
    /// segments are dropped.
    pub fn insert_raw(&mut self, value: &str) {
        for v in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if let Some(field) = v.strip_prefix('-') {
                self.insert(field, Order::Desc);
            } else {
                self.insert(v, Order::Asc);
            }
        }
    }

    pub fn insert(&mut self, field: &str, order: Order) {
        self.0.push((field.to_string(), order));
    }

    /// Serialized `sort` parameter value, `None` when nothing was set.
    pub fn to_param(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(
            self.0
                .iter()
                .map(|(field, order)| match order {
                    Order::Asc => field.clone(),
                    Order::Desc => format!("-{field}"),
                })
                .join(","),
        )
    }
}
