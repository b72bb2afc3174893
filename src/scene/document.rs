//! Scene documents as written in TOML or JSON, and their validation into a [`Scene`].
//!
//! Every field the author may leave out is an `Option` here. [`SceneDocument::resolve`]
//! is the single merge step that checks ranges and fills gaps from [`SceneDefaults`];
//! it collects every problem it finds instead of stopping at the first.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{FieldError, SpecError};
use crate::layout::clock::ClockTime;
use crate::layout::grid::fitted_cell;
use crate::layout::labels::LabelValues;
use crate::layout::mandala::MandalaLayer;
use crate::layout::segments::Direction;
use crate::layout::spiral::SpiralKind;
use crate::layout::types::{Point, SceneType};
use crate::layout::venn::overlap_key;

use super::defaults::SceneDefaults;
use super::model::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SceneDocument {
    #[serde(rename = "type")]
    pub scene_type: SceneType,
    pub canvas: Option<CanvasDoc>,
    pub geometry: Option<GeometryDoc>,
    pub segments: Option<SegmentsDoc>,
    pub labels: Option<LabelsDoc>,
    pub clock: Option<ClockDoc>,
    pub venn: Option<VennDoc>,
    pub grid: Option<GridDoc>,
    pub spiral: Option<SpiralDoc>,
    pub mandala: Option<MandalaDoc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CanvasDoc {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointDoc {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeometryDoc {
    pub center: Option<PointDoc>,
    pub radius: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SegmentsDoc {
    pub count: i64,
    pub start_angle: Option<f64>,
    pub direction: Option<Direction>,
}

/// Either an explicit list of strings or a generator name
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelValuesDoc {
    List(Vec<String>),
    Generator(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabelsDoc {
    pub values: Option<LabelValuesDoc>,
    pub placement: Option<LabelPlacement>,
    pub offset_radius: Option<f64>,
    pub font_size: Option<f64>,
    pub rotate: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandsDoc {
    pub hour: Option<HandStyle>,
    pub minute: Option<HandStyle>,
    pub second: Option<HandStyle>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClockDoc {
    pub time: String,
    pub hands: Option<HandsDoc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VennDoc {
    pub sets: Vec<String>,
    #[serde(default)]
    pub overlaps: BTreeMap<String, String>,
    #[serde(default)]
    pub set_colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridItemDoc {
    #[serde(default)]
    pub label: String,
    pub style: Option<ItemStyle>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GridDoc {
    pub rows: i64,
    pub cols: i64,
    pub cell_width: Option<f64>,
    pub cell_height: Option<f64>,
    pub spacing: Option<f64>,
    #[serde(default)]
    pub items: Vec<GridItemDoc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpiralItemDoc {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub rotation: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpiralDoc {
    #[serde(rename = "type")]
    pub kind: Option<SpiralKind>,
    pub count: i64,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub start_angle: Option<f64>,
    pub turns: Option<f64>,
    #[serde(default)]
    pub items: Vec<SpiralItemDoc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayerDoc {
    pub radius: f64,
    pub size: Option<f64>,
    pub count: Option<i64>,
    pub label: Option<String>,
    pub labels: Option<LabelValuesDoc>,
    #[serde(default)]
    pub rotation: bool,
    pub offset_rotate: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MandalaDoc {
    pub axes: i64,
    pub start_angle: Option<f64>,
    #[serde(default)]
    pub layers: Vec<LayerDoc>,
}

/// Collects field errors while resolution keeps going with placeholder values
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(path, message));
    }

    fn count(&mut self, path: &str, value: i64, min: u32) -> u32 {
        match u32::try_from(value) {
            Ok(count) if count >= min => count,
            _ => {
                self.fail(path, format!("must be at least {min}, got {value}"));
                min
            }
        }
    }

    fn non_negative(&mut self, path: &str, value: f64) -> f64 {
        if value.is_finite() && value >= 0.0 {
            value
        } else {
            self.fail(path, format!("must be a non-negative number, got {value}"));
            0.0
        }
    }

    fn positive(&mut self, path: &str, value: f64) -> f64 {
        if value.is_finite() && value > 0.0 {
            value
        } else {
            self.fail(path, format!("must be a positive number, got {value}"));
            1.0
        }
    }

    fn finite(&mut self, path: &str, value: f64) -> f64 {
        if value.is_finite() {
            value
        } else {
            self.fail(path, format!("must be a finite number, got {value}"));
            0.0
        }
    }

    fn label_values(&mut self, path: &str, doc: &LabelValuesDoc) -> LabelValues {
        match doc {
            LabelValuesDoc::List(values) => LabelValues::Explicit(values.clone()),
            LabelValuesDoc::Generator(name) => match name.as_str() {
                "numeric" => LabelValues::Numeric,
                "alpha" => LabelValues::Alpha,
                "roman" => LabelValues::Roman,
                other => {
                    self.fail(
                        path,
                        format!("unknown generator '{other}', expected numeric, alpha, roman or a list"),
                    );
                    LabelValues::Numeric
                }
            },
        }
    }

    fn finish<T>(self, value: T) -> Result<T, SpecError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(SpecError::Invalid(self.errors))
        }
    }
}

impl SceneDocument {
    pub fn from_toml(source: &str) -> Result<Self, SpecError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_json(source: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Validate every field and apply defaults, producing a typed scene
    pub fn resolve(&self, defaults: &SceneDefaults) -> Result<Scene, SpecError> {
        let mut check = Checker::default();

        let canvas_doc = self.canvas.clone().unwrap_or_default();
        let canvas = Canvas {
            width: check.positive(
                "canvas.width",
                canvas_doc.width.unwrap_or(defaults.canvas_size.0),
            ),
            height: check.positive(
                "canvas.height",
                canvas_doc.height.unwrap_or(defaults.canvas_size.1),
            ),
        };

        let geometry = self.resolve_geometry(&canvas, defaults, &mut check);
        let segments = self.resolve_segments(defaults, &mut check);
        let labels = self.resolve_labels(defaults, &mut check);
        self.check_payloads(&mut check);

        let kind = match self.scene_type {
            SceneType::Circle => SceneKind::Circle,
            SceneType::Clock => match &self.clock {
                Some(doc) => SceneKind::Clock(resolve_clock(doc, &mut check)),
                None => return missing(check, "clock"),
            },
            SceneType::Venn => match &self.venn {
                Some(doc) => SceneKind::Venn(resolve_venn(doc, &mut check)),
                None => return missing(check, "venn"),
            },
            SceneType::Grid => match &self.grid {
                Some(doc) => SceneKind::Grid(resolve_grid(doc, &geometry, defaults, &mut check)),
                None => return missing(check, "grid"),
            },
            SceneType::Spiral => match &self.spiral {
                Some(doc) => {
                    SceneKind::Spiral(resolve_spiral(doc, &geometry, defaults, &mut check))
                }
                None => return missing(check, "spiral"),
            },
            SceneType::Mandala => match &self.mandala {
                Some(doc) => SceneKind::Mandala(resolve_mandala(doc, defaults, &mut check)),
                None => return missing(check, "mandala"),
            },
        };

        // Circles always draw segments
        let segments = match (self.scene_type, segments) {
            (SceneType::Circle, None) => Some(Segments {
                count: defaults.circle_segments,
                start_angle: defaults.start_angle,
                direction: defaults.direction,
            }),
            (_, segments) => segments,
        };

        check.finish(Scene {
            canvas,
            geometry,
            segments,
            labels,
            kind,
        })
    }

    fn resolve_geometry(
        &self,
        canvas: &Canvas,
        defaults: &SceneDefaults,
        check: &mut Checker,
    ) -> Geometry {
        let doc = self.geometry.clone().unwrap_or_default();
        let (width, height) = defaults.extent_for(canvas.width, canvas.height);
        let center = match doc.center {
            Some(p) => Point::new(
                check.finite("geometry.center.x", p.x),
                check.finite("geometry.center.y", p.y),
            ),
            None => canvas.center(),
        };
        Geometry {
            center,
            radius: check.non_negative(
                "geometry.radius",
                doc.radius
                    .unwrap_or_else(|| defaults.radius_for(canvas.width, canvas.height)),
            ),
            width: check.non_negative("geometry.width", doc.width.unwrap_or(width)),
            height: check.non_negative("geometry.height", doc.height.unwrap_or(height)),
        }
    }

    fn resolve_segments(&self, defaults: &SceneDefaults, check: &mut Checker) -> Option<Segments> {
        let doc = self.segments.as_ref()?;
        Some(Segments {
            count: check.count("segments.count", doc.count, 1),
            start_angle: check.finite(
                "segments.startAngle",
                doc.start_angle.unwrap_or(defaults.start_angle),
            ),
            direction: doc.direction.unwrap_or(defaults.direction),
        })
    }

    fn resolve_labels(&self, defaults: &SceneDefaults, check: &mut Checker) -> Option<LabelSpec> {
        let doc = self.labels.as_ref()?;
        let values = match &doc.values {
            Some(values) => check.label_values("labels.values", values),
            None => LabelValues::Numeric,
        };
        Some(LabelSpec {
            values,
            placement: doc.placement.unwrap_or_default(),
            offset_radius: check.non_negative(
                "labels.offsetRadius",
                doc.offset_radius.unwrap_or(defaults.label_offset),
            ),
            font_size: check.positive(
                "labels.fontSize",
                doc.font_size.unwrap_or(defaults.label_font_size),
            ),
            rotate: doc.rotate.unwrap_or(false),
        })
    }

    /// Payload blocks that do not belong to the declared scene type
    fn check_payloads(&self, check: &mut Checker) {
        let present = [
            ("clock", SceneType::Clock, self.clock.is_some()),
            ("venn", SceneType::Venn, self.venn.is_some()),
            ("grid", SceneType::Grid, self.grid.is_some()),
            ("spiral", SceneType::Spiral, self.spiral.is_some()),
            ("mandala", SceneType::Mandala, self.mandala.is_some()),
        ];
        for (name, owner, is_present) in present {
            if is_present && owner != self.scene_type {
                check.fail(
                    name,
                    format!("not used by scene type {}", self.scene_type),
                );
            }
        }
    }
}

fn missing<T>(mut check: Checker, block: &str) -> Result<T, SpecError> {
    check.fail(block, format!("required for scene type {block}"));
    Err(SpecError::Invalid(check.errors))
}

fn resolve_clock(doc: &ClockDoc, check: &mut Checker) -> ClockSpec {
    let time = doc.time.parse::<ClockTime>().unwrap_or_else(|err| {
        check.fail("clock.time", err.to_string());
        ClockTime {
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    });

    let hands_doc = doc.hands.clone().unwrap_or_default();
    let hands = HandStyles {
        hour: hands_doc.hour.unwrap_or_default(),
        minute: hands_doc.minute.unwrap_or_default(),
        second: hands_doc.second.unwrap_or_default(),
    };
    for (name, hand) in [
        ("hour", &hands.hour),
        ("minute", &hands.minute),
        ("second", &hands.second),
    ] {
        if let Some(width) = hand.width {
            check.non_negative(&format!("clock.hands.{name}.width"), width);
        }
        if let Some(length) = hand.length {
            check.non_negative(&format!("clock.hands.{name}.length"), length);
        }
    }

    ClockSpec { time, hands }
}

fn resolve_venn(doc: &VennDoc, check: &mut Checker) -> VennSpec {
    let names: Vec<String> = doc.sets.iter().map(|s| s.trim().to_string()).collect();

    if names.len() != 3 {
        check.fail(
            "venn.sets",
            format!("expected exactly 3 sets, got {}", names.len()),
        );
    }
    for (i, name) in names.iter().enumerate() {
        if name.is_empty() {
            check.fail(format!("venn.sets[{i}]"), "set name must not be empty");
        } else if name.contains(',') {
            check.fail(format!("venn.sets[{i}]"), "set name must not contain ','");
        } else if names[..i].contains(name) {
            check.fail(format!("venn.sets[{i}]"), format!("duplicate set '{name}'"));
        }
    }

    for key in doc.overlaps.keys() {
        let members = overlap_key(key);
        let unknown: Vec<&String> = members.iter().filter(|m| !names.contains(m)).collect();
        if !unknown.is_empty() {
            check.fail(
                format!("venn.overlaps.\"{key}\""),
                format!("unknown set '{}'", unknown[0]),
            );
        } else if !(2..=3).contains(&members.len()) {
            check.fail(
                format!("venn.overlaps.\"{key}\""),
                "an overlap names 2 or 3 distinct sets",
            );
        } else if members.windows(2).any(|w| w[0] == w[1]) {
            check.fail(
                format!("venn.overlaps.\"{key}\""),
                "an overlap names 2 or 3 distinct sets",
            );
        }
    }

    for name in doc.set_colors.keys() {
        if !names.contains(&name.trim().to_string()) {
            check.fail(
                format!("venn.setColors.{name}"),
                format!("unknown set '{name}'"),
            );
        }
    }

    let set = |i: usize| names.get(i).cloned().unwrap_or_default();
    VennSpec {
        sets: [set(0), set(1), set(2)],
        overlaps: doc.overlaps.clone(),
        set_colors: doc
            .set_colors
            .iter()
            .map(|(k, v)| (k.trim().to_string(), v.clone()))
            .collect(),
    }
}

fn resolve_grid(
    doc: &GridDoc,
    geometry: &Geometry,
    defaults: &SceneDefaults,
    check: &mut Checker,
) -> GridSpec {
    let rows = check.count("grid.rows", doc.rows, 1);
    let cols = check.count("grid.cols", doc.cols, 1);
    let spacing = check.non_negative("grid.spacing", doc.spacing.unwrap_or(defaults.grid_spacing));

    let cell_width = match doc.cell_width {
        Some(w) => check.non_negative("grid.cellWidth", w),
        None => fitted_cell(geometry.width, cols, spacing),
    };
    let cell_height = match doc.cell_height {
        Some(h) => check.non_negative("grid.cellHeight", h),
        None => fitted_cell(geometry.height, rows, spacing),
    };

    let cells = rows as usize * cols as usize;
    if doc.items.len() > cells {
        check.fail(
            "grid.items",
            format!("{} items do not fit in {cells} cells", doc.items.len()),
        );
    }

    GridSpec {
        rows,
        cols,
        cell_width,
        cell_height,
        spacing,
        items: doc
            .items
            .iter()
            .map(|item| GridItem {
                label: item.label.clone(),
                style: item.style.clone().unwrap_or_default(),
            })
            .collect(),
    }
}

fn resolve_spiral(
    doc: &SpiralDoc,
    geometry: &Geometry,
    defaults: &SceneDefaults,
    check: &mut Checker,
) -> SpiralSpec {
    let kind = doc.kind.unwrap_or(defaults.spiral_kind);
    let count = check.count("spiral.count", doc.count, 1);
    let turns = check.non_negative("spiral.turns", doc.turns.unwrap_or(defaults.spiral_turns));
    let a = check.non_negative("spiral.a", doc.a.unwrap_or(defaults.spiral_a));
    let b = match (doc.b, kind) {
        (Some(b), _) => check.finite("spiral.b", b),
        (None, SpiralKind::Archimedean) => defaults.archimedean_b((geometry.radius - a).max(0.0), turns),
        (None, SpiralKind::Logarithmic) => defaults.spiral_log_b,
    };

    if doc.items.len() > count as usize {
        check.fail(
            "spiral.items",
            format!("{} items for {count} points", doc.items.len()),
        );
    }

    SpiralSpec {
        kind,
        count,
        a,
        b,
        start_angle: check.finite("spiral.startAngle", doc.start_angle.unwrap_or(0.0)),
        turns,
        items: doc
            .items
            .iter()
            .map(|item| SpiralItem {
                label: item.label.clone(),
                rotation: item.rotation,
            })
            .collect(),
    }
}

fn resolve_mandala(doc: &MandalaDoc, defaults: &SceneDefaults, check: &mut Checker) -> MandalaSpec {
    let axes = check.count("mandala.axes", doc.axes, 3);
    let layers = doc
        .layers
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            let path = |field: &str| format!("mandala.layers[{i}].{field}");
            MandalaLayer {
                radius: check.non_negative(&path("radius"), layer.radius),
                size: check.non_negative(
                    &path("size"),
                    layer.size.unwrap_or(defaults.mandala_element_size),
                ),
                count: layer.count.map(|c| check.count(&path("count"), c, 1)),
                label: layer.label.clone(),
                labels: layer
                    .labels
                    .as_ref()
                    .map(|values| check.label_values(&path("labels"), values)),
                rotation: layer.rotation,
                offset_rotate: check.finite(&path("offsetRotate"), layer.offset_rotate.unwrap_or(0.0)),
            }
        })
        .collect();

    MandalaSpec {
        axes,
        start_angle: check.finite(
            "mandala.startAngle",
            doc.start_angle.unwrap_or(defaults.start_angle),
        ),
        layers,
    }
}
