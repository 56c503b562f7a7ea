use serde::Serialize;

/// One row of the input table: a label and its value in each of the two states.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub label: String,
    pub left: f32,
    pub right: f32,
}

impl Category {
    pub fn new(label: impl Into<String>, left: f32, right: f32) -> Self {
        Self {
            label: label.into(),
            left,
            right,
        }
    }
}

/// The three-column table a plot is drawn from.
///
/// Row order decides stacking order: the first category sits at the bottom of
/// both bars. Labels are expected to be unique; a repeated label shares (and
/// overwrites) the color of its earlier occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub left_title: String,
    pub right_title: String,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Dataset {
    pub fn new(left_title: impl Into<String>, right_title: impl Into<String>) -> Self {
        Self {
            left_title: left_title.into(),
            right_title: right_title.into(),
            categories: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, left: f32, right: f32) {
        self.categories.push(Category::new(label, left, right));
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|category| category.label.as_str())
            .collect()
    }

    pub fn values(&self, side: Side) -> Vec<f32> {
        self.categories
            .iter()
            .map(|category| match side {
                Side::Left => category.left,
                Side::Right => category.right,
            })
            .collect()
    }

    pub fn title(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_title,
            Side::Right => &self.right_title,
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f32, f32)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (S, f32, f32)>>(iter: I) -> Self {
        let mut dataset = Dataset::new("", "");
        for (label, left, right) in iter {
            dataset.push(label, left, right);
        }
        dataset
    }
}
