// Widget-shaped data and the pure transformations that build it
use serde::{ser::Error as _, Deserialize, Deserializer, Serialize, Serializer};

const DEFAULT_MIN_TEXT: &str = "Min value";
const DEFAULT_MAX_TEXT: &str = "Max value";

/// A numeric value shown on a widget. Never range-checked; the service decides what it accepts.
///
/// NaN and infinities have no JSON form and fail serialization instead of becoming `null`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Int(i64),
    Float(f64),
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Metric::Int(value) => serializer.serialize_i64(value),
            Metric::Float(value) if value.is_finite() => serializer.serialize_f64(value),
            Metric::Float(value) => Err(S::Error::custom(format!(
                "non-finite value {value} cannot be sent"
            ))),
        }
    }
}

impl From<i64> for Metric {
    fn from(value: i64) -> Self {
        Metric::Int(value)
    }
}

impl From<i32> for Metric {
    fn from(value: i32) -> Self {
        Metric::Int(value.into())
    }
}

impl From<u32> for Metric {
    fn from(value: u32) -> Self {
        Metric::Int(value.into())
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Metric::Float(value)
    }
}

impl From<f32> for Metric {
    fn from(value: f32) -> Self {
        Metric::Float(value.into())
    }
}

/// The `data` member of a push payload. Serialized without a tag: the endpoint
/// already knows the widget type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WidgetData {
    NumberAndSecondary(NumberAndSecondaryData),
    Text(TextData),
    Rag(RagData),
    Line(LineData),
    Pie(PieData),
    Geckometer(GeckometerData),
    Funnel(FunnelData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledValue {
    pub text: String,
    pub value: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberAndSecondaryData {
    pub item: [LabelledValue; 2],
}

// Text widget

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextKind {
    Alert,
    Info,
    #[default]
    #[serde(other)]
    Plain,
}

impl TextKind {
    pub fn code(self) -> u8 {
        match self {
            TextKind::Plain => 0,
            TextKind::Alert => 1,
            TextKind::Info => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextEntry {
    pub text: String,
    #[serde(default, rename = "type", deserialize_with = "kind_or_plain")]
    pub kind: TextKind,
}

fn kind_or_plain<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TextKind, D::Error> {
    Ok(Option::<TextKind>::deserialize(deserializer)?.unwrap_or_default())
}

impl TextEntry {
    pub fn new(text: impl Into<String>, kind: TextKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TextKind::Plain)
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self::new(text, TextKind::Alert)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, TextKind::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextItem {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextData {
    pub item: Vec<TextItem>,
}

// RAG widget

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagEntry {
    pub value: Metric,
    pub text: String,
}

impl RagEntry {
    pub fn new(value: impl Into<Metric>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Always red, amber, green in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagData {
    pub item: [RagEntry; 3],
}

// Line chart

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSettings {
    #[serde(rename = "axisx", skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    #[serde(rename = "axisy", skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineData {
    pub item: Vec<Metric>,
    pub settings: LineSettings,
}

// Pie chart

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub value: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
}

impl PieSlice {
    pub fn new(value: impl Into<Metric>) -> Self {
        Self {
            value: value.into(),
            label: None,
            colour: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieData {
    pub item: Vec<PieSlice>,
}

// Geckometer

/// One end of the geckometer scale. `text` falls back to a default label when unset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeckometerBound {
    pub value: Metric,
    #[serde(default)]
    pub text: Option<String>,
}

impl GeckometerBound {
    pub fn new(value: impl Into<Metric>) -> Self {
        Self {
            value: value.into(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn labelled(self, default_text: &str) -> LabelledValue {
        LabelledValue {
            text: self.text.unwrap_or_else(|| default_text.to_string()),
            value: self.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeckometerData {
    pub item: Metric,
    pub min: LabelledValue,
    pub max: LabelledValue,
}

// Funnel

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub value: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FunnelStage {
    pub fn new(value: impl Into<Metric>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct FunnelOptions {
    /// Flips the colours on the widget.
    #[serde(default)]
    pub reverse: bool,
    /// Hides the percentage value on the widget.
    #[serde(default)]
    pub hide_percentage: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelData {
    pub item: Vec<FunnelStage>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<&'static str>,
}

pub fn number_and_secondary_value(
    value: impl Into<Metric>,
    previous_value: impl Into<Metric>,
) -> WidgetData {
    WidgetData::NumberAndSecondary(NumberAndSecondaryData {
        item: [
            LabelledValue {
                text: String::new(),
                value: value.into(),
            },
            LabelledValue {
                text: String::new(),
                value: previous_value.into(),
            },
        ],
    })
}

pub fn text(items: Vec<TextEntry>) -> WidgetData {
    let item = items
        .into_iter()
        .map(|entry| TextItem {
            text: entry.text,
            kind: entry.kind.code(),
        })
        .collect();

    WidgetData::Text(TextData { item })
}

pub fn rag(red: RagEntry, amber: RagEntry, green: RagEntry) -> WidgetData {
    WidgetData::Rag(RagData {
        item: [red, amber, green],
    })
}

pub fn line<M: Into<Metric>>(
    values: impl IntoIterator<Item = M>,
    settings: LineSettings,
) -> WidgetData {
    WidgetData::Line(LineData {
        item: values.into_iter().map(Into::into).collect(),
        settings,
    })
}

pub fn pie(items: Vec<PieSlice>) -> WidgetData {
    WidgetData::Pie(PieData { item: items })
}

pub fn geckometer(
    value: impl Into<Metric>,
    min: GeckometerBound,
    max: GeckometerBound,
) -> WidgetData {
    WidgetData::Geckometer(GeckometerData {
        item: value.into(),
        min: min.labelled(DEFAULT_MIN_TEXT),
        max: max.labelled(DEFAULT_MAX_TEXT),
    })
}

pub fn funnel(items: Vec<FunnelStage>, options: FunnelOptions) -> WidgetData {
    WidgetData::Funnel(FunnelData {
        item: items,
        kind: options.reverse.then_some("reverse"),
        percentage: options.hide_percentage.then_some("hide"),
    })
}
