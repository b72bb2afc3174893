//! Ground-truth assembly
//!
//! Dispatches on the scene kind, runs the matching layout calculators and
//! composes their output into a [`VectorScene`]: a list of named groups, one per
//! semantic layer, holding primitives with coordinates rounded to two decimals.
//!
//! ## Layers per scene type
//!
//! - circle: `outline`, `segment-lines`, `segment-points`, `labels`
//! - clock: `face`, `ticks`, `labels`, `hands`, `pivot`
//! - venn: `venn-circles`, `set-labels`, `overlap-labels`
//! - grid: `cells`, `labels`
//! - spiral: `spiral-path`, `items`, `labels`
//! - mandala: `axes`, then `layer-1` .. `layer-n`
//!
//! Every layer is emitted even when empty, so a consumer can address it by name.

use crate::log::debug;
use crate::scene::{
    ClockSpec, GridSpec, HandStyle, MandalaSpec, Scene, SceneKind, SpiralSpec,
    VennSpec,
};
use crate::stylesheet::Stylesheet;

use super::clock::hand_angles;
use super::collision::resolve_collisions;
use super::config::LayoutConfig;
use super::grid::{cell_bounds, centered_top_left, grid_extent, grid_positions};
use super::labels::{generate_labels, resolve_orientation, LabelValues};
use super::mandala::{axis_lines, layer_elements};
use super::polar::{cartesian_to_polar, normalize_angle, polar_to_cartesian};
use super::segments::{segment_angles, segment_lines, segment_positions, Direction};
use super::spiral::{spiral_path, spiral_points, tangent_angles};
use super::transform::Rotation;
use super::types::*;
use super::venn::{overlap_key, pair_region_anchor, set_label_anchor, venn_centers};

/// Hour numerals start one hour past twelve o'clock
const CLOCK_FIRST_NUMERAL_ANGLE: f64 = -60.0;

/// Fill opacity of Venn circles so overlaps stay visible
const VENN_FILL_OPACITY: f64 = 0.35;

/// Build the vector description of a scene
pub fn assemble(scene: &Scene, config: &LayoutConfig, stylesheet: &Stylesheet) -> VectorScene {
    let scene_type = scene.scene_type();
    debug!(%scene_type, width = scene.canvas.width, height = scene.canvas.height, "assembling scene");

    let assembler = Assembler {
        scene,
        config,
        stylesheet,
    };
    let groups = match &scene.kind {
        SceneKind::Circle => assembler.circle(),
        SceneKind::Clock(clock) => assembler.clock(clock),
        SceneKind::Venn(venn) => assembler.venn(venn),
        SceneKind::Grid(grid) => assembler.grid(grid),
        SceneKind::Spiral(spiral) => assembler.spiral(spiral),
        SceneKind::Mandala(mandala) => assembler.mandala(mandala),
    };

    let mut output = VectorScene::new(scene_type, scene.canvas.width, scene.canvas.height);
    output.groups = groups;
    debug!(
        %scene_type,
        layers = output.groups.len(),
        primitives = output.groups.iter().map(|g| g.children.len()).sum::<usize>(),
        "scene assembled"
    );
    output
}

/// A label to place on a ring before collision resolution
struct RingLabel {
    text: String,
    angle: f64,
}

struct Assembler<'a> {
    scene: &'a Scene,
    config: &'a LayoutConfig,
    stylesheet: &'a Stylesheet,
}

impl Assembler<'_> {
    fn color(&self, token: &str) -> String {
        self.stylesheet.resolve_or_default(token)
    }

    fn center(&self) -> Point {
        self.scene.geometry.center
    }

    fn radius(&self) -> f64 {
        self.scene.geometry.radius
    }

    fn font_size(&self) -> f64 {
        self.scene
            .labels
            .as_ref()
            .map_or(self.config.label_font_size, |labels| labels.font_size)
    }

    fn text_style(&self) -> Style {
        Style::text(self.color("text-1"), self.font_size())
    }

    fn outline_style(&self) -> Style {
        Style::stroked(self.color("stroke-1"), self.config.stroke_width)
    }

    fn marker(&self, id: String, at: Point) -> Primitive {
        Primitive::circle(
            Some(id),
            at,
            self.config.marker_radius,
            Style::filled(self.color("accent-1")),
        )
    }

    /// Text centered on its anchor point
    fn centered_text(&self, content: &str, at: Point, rotation: Option<Rotation>) -> Primitive {
        Primitive::text(
            content,
            at,
            TextAnchor::Middle,
            Em(0.35),
            rotation,
            self.text_style(),
        )
    }

    /// Labels on a ring around the center, oriented by angle and pushed apart
    /// where their estimated boxes overlap
    fn ring_labels(&self, labels: Vec<RingLabel>, ring_radius: f64, rotate: bool) -> Group {
        let mut group = Group::new("labels");
        let labels: Vec<RingLabel> = labels.into_iter().filter(|l| !l.text.is_empty()).collect();
        let font_size = self.font_size();

        let positions: Vec<Point> = labels
            .iter()
            .map(|l| polar_to_cartesian(self.center(), PolarCoord::new(ring_radius, l.angle)))
            .collect();
        let sizes: Vec<Size> = labels
            .iter()
            .map(|l| self.config.label_size(&l.text, font_size))
            .collect();
        let outcome = resolve_collisions(
            positions,
            &sizes,
            self.config.collision_min_distance,
            self.config.collision_max_iterations,
        );

        for (label, position) in labels.iter().zip(outcome.positions) {
            let orientation = resolve_orientation(label.angle);
            let rotation =
                rotate.then(|| Rotation::new(normalize_angle(label.angle + 90.0), position));
            group.push(Primitive::text(
                label.text.as_str(),
                position,
                orientation.anchor,
                orientation.dy,
                rotation,
                self.text_style(),
            ));
        }
        group
    }

    // ============================================
    // Circle
    // ============================================

    fn circle(&self) -> Vec<Group> {
        let center = self.center();
        let radius = self.radius();
        let (count, start, direction) = match self.scene.segments {
            Some(s) => (s.count, s.start_angle, s.direction),
            None => (0, 0.0, Direction::Clockwise),
        };

        let mut outline = Group::new("outline");
        outline.push(Primitive::circle(
            Some("main-circle".to_string()),
            center,
            radius,
            self.outline_style(),
        ));

        let mut lines = Group::new("segment-lines");
        let line_style = Style::stroked(self.color("stroke-2"), self.config.stroke_width / 2.0);
        for (i, line) in segment_lines(center, 0.0, radius, count, start, direction)
            .into_iter()
            .enumerate()
        {
            lines.push(Primitive::line(
                Some(format!("segment-line-{i}")),
                line.from,
                line.to,
                line_style.clone(),
            ));
        }

        let mut points = Group::new("segment-points");
        for (i, point) in segment_positions(center, radius, count, start, direction)
            .into_iter()
            .enumerate()
        {
            points.push(self.marker(format!("segment-{i}"), point));
        }

        let labels = match &self.scene.labels {
            Some(spec) => {
                let texts = generate_labels(&spec.values, count as usize);
                let ring = spec.placement.label_radius(radius, spec.offset_radius);
                let ring_labels = texts
                    .into_iter()
                    .zip(segment_angles(count, start, direction))
                    .map(|(text, angle)| RingLabel { text, angle })
                    .collect();
                self.ring_labels(ring_labels, ring, spec.rotate)
            }
            None => Group::new("labels"),
        };

        vec![outline, lines, points, labels]
    }

    // ============================================
    // Clock
    // ============================================

    fn clock(&self, clock: &ClockSpec) -> Vec<Group> {
        let center = self.center();
        let radius = self.radius();
        let (major_length, minor_length) = self.config.tick_lengths;

        let mut face = Group::new("face");
        face.push(Primitive::circle(
            Some("face-circle".to_string()),
            center,
            radius,
            Style::stroked(self.color("stroke-1"), self.config.stroke_width * 2.0)
                .merge(&Style::filled(self.color("background-1"))),
        ));

        let mut ticks = Group::new("ticks");
        let minute_ticks = segment_lines(
            center,
            radius - minor_length,
            radius,
            60,
            -90.0,
            Direction::Clockwise,
        );
        let hour_ticks = segment_lines(
            center,
            radius - major_length,
            radius,
            12,
            -90.0,
            Direction::Clockwise,
        );
        for (i, tick) in minute_ticks.into_iter().enumerate() {
            if i % 5 == 0 {
                let hour = &hour_ticks[i / 5];
                ticks.push(Primitive::line(
                    Some(format!("hour-tick-{}", i / 5)),
                    hour.from,
                    hour.to,
                    Style::stroked(self.color("stroke-1"), self.config.stroke_width * 1.5),
                ));
            } else {
                ticks.push(Primitive::line(
                    Some(format!("minute-tick-{i}")),
                    tick.from,
                    tick.to,
                    Style::stroked(self.color("stroke-2"), self.config.stroke_width / 2.0),
                ));
            }
        }

        let numeral_angles = segment_angles(12, CLOCK_FIRST_NUMERAL_ANGLE, Direction::Clockwise);
        let (values, ring, rotate) = match &self.scene.labels {
            Some(spec) => (
                spec.values.clone(),
                spec.placement.label_radius(radius, spec.offset_radius),
                spec.rotate,
            ),
            None => (
                LabelValues::Numeric,
                (radius - major_length - self.font_size()).max(0.0),
                false,
            ),
        };
        let ring_labels = generate_labels(&values, 12)
            .into_iter()
            .zip(numeral_angles)
            .map(|(text, angle)| RingLabel { text, angle })
            .collect();
        let labels = self.ring_labels(ring_labels, ring, rotate);

        let angles = hand_angles(&clock.time);
        let (hour_ratio, minute_ratio, second_ratio) = self.config.hand_length_ratios;
        let mut hands = Group::new("hands");
        for (name, angle, ratio, width, hand) in [
            ("hour", angles.hour, hour_ratio, 3.0, &clock.hands.hour),
            ("minute", angles.minute, minute_ratio, 2.0, &clock.hands.minute),
            ("second", angles.second, second_ratio, 1.0, &clock.hands.second),
        ] {
            hands.push(self.hand(name, angle, ratio, width, hand));
        }

        let mut pivot = Group::new("pivot");
        pivot.push(Primitive::circle(
            Some("pivot-dot".to_string()),
            center,
            self.config.marker_radius,
            Style::filled(self.color("hand-hour")),
        ));

        vec![face, ticks, labels, hands, pivot]
    }

    fn hand(
        &self,
        name: &str,
        angle: f64,
        default_ratio: f64,
        default_width: f64,
        style: &HandStyle,
    ) -> Primitive {
        let center = self.center();
        let length = style.length.unwrap_or(default_ratio) * self.radius();
        let color = match &style.color {
            Some(color) => self.color(color),
            None => self.color(&format!("hand-{name}")),
        };
        let width = style
            .width
            .unwrap_or(default_width * self.config.stroke_width);
        Primitive::line(
            Some(format!("{name}-hand")),
            center,
            polar_to_cartesian(center, PolarCoord::new(length, angle)),
            Style::stroked(color, width),
        )
    }

    // ============================================
    // Venn
    // ============================================

    fn venn(&self, venn: &VennSpec) -> Vec<Group> {
        let center = self.center();
        let radius = self.radius();
        let ratio = self.config.venn_offset_ratio;
        let centers = venn_centers(center, radius, ratio);

        let mut circles = Group::new("venn-circles");
        let mut set_labels = Group::new("set-labels");
        for (i, (name, set_center)) in venn.sets.iter().zip(centers).enumerate() {
            let token = venn
                .set_colors
                .get(name)
                .cloned()
                .unwrap_or_else(|| format!("set-{}", i + 1));
            let color = self.color(&token);
            let style = Style {
                fill: Some(color.clone()),
                stroke: Some(color),
                stroke_width: Some(self.config.stroke_width),
                opacity: Some(VENN_FILL_OPACITY),
                font_size: None,
            };
            circles.push(Primitive::circle(
                Some(format!("set-{}", i + 1)),
                set_center,
                radius,
                style,
            ));
            set_labels.push(self.centered_text(
                name,
                set_label_anchor(center, radius, ratio, i),
                None,
            ));
        }

        let mut overlap_labels = Group::new("overlap-labels");
        for (key, text) in &venn.overlaps {
            let indices: Vec<usize> = overlap_key(key)
                .iter()
                .filter_map(|name| venn.sets.iter().position(|s| s == name))
                .collect();
            let anchor = match indices.as_slice() {
                [a, b] => pair_region_anchor(&centers, radius, *a.min(b), *a.max(b)),
                [_, _, _] => center,
                _ => continue,
            };
            overlap_labels.push(self.centered_text(text, anchor, None));
        }

        vec![circles, set_labels, overlap_labels]
    }

    // ============================================
    // Grid
    // ============================================

    fn grid(&self, grid: &GridSpec) -> Vec<Group> {
        let extent = grid_extent(
            grid.rows,
            grid.cols,
            grid.cell_width,
            grid.cell_height,
            grid.spacing,
        );
        let top_left = centered_top_left(self.center(), extent);
        let positions = grid_positions(
            top_left,
            grid.rows,
            grid.cols,
            grid.cell_width,
            grid.cell_height,
            grid.spacing,
        );

        let base = self
            .outline_style()
            .merge(&Style::filled(self.color("background-2")));
        let mut cells = Group::new("cells");
        let mut labels = Group::new("labels");
        for (i, position) in positions.into_iter().enumerate() {
            let (row, col) = (i as u32 / grid.cols, i as u32 % grid.cols);
            let item = grid.items.get(i);
            let style = match item {
                Some(item) => base.merge(&Style {
                    fill: item.style.fill.as_deref().map(|c| self.color(c)),
                    stroke: item.style.stroke.as_deref().map(|c| self.color(c)),
                    ..Style::default()
                }),
                None => base.clone(),
            };
            cells.push(Primitive::rect(
                Some(format!("cell-{row}-{col}")),
                cell_bounds(position, grid.cell_width, grid.cell_height),
                style,
            ));
            if let Some(item) = item.filter(|item| !item.label.is_empty()) {
                labels.push(self.centered_text(&item.label, position, None));
            }
        }

        vec![cells, labels]
    }

    // ============================================
    // Spiral
    // ============================================

    fn spiral(&self, spiral: &SpiralSpec) -> Vec<Group> {
        let center = self.center();
        let params = spiral.params();

        let mut path = Group::new("spiral-path");
        path.push(Primitive::polyline(
            Some("spiral".to_string()),
            &spiral_path(center, &params, self.config.spiral_path_samples),
            false,
            Style::stroked(self.color("stroke-2"), self.config.stroke_width),
        ));

        let points = spiral_points(center, &params, spiral.count as usize);
        let tangents = tangent_angles(&points);

        let mut items = Group::new("items");
        for (i, point) in points.iter().enumerate() {
            items.push(self.marker(format!("item-{i}"), *point));
        }

        // Labels sit just outside their marker, away from the center
        let gap = self.config.marker_radius * 2.0;
        let mut placed = Vec::new();
        for (i, item) in spiral.items.iter().enumerate() {
            if item.label.is_empty() {
                continue;
            }
            let (Some(point), Some(tangent)) = (points.get(i), tangents.get(i)) else {
                continue;
            };
            let outward = cartesian_to_polar(center, *point).angle;
            let position = polar_to_cartesian(*point, PolarCoord::new(gap, outward));
            placed.push((item, outward, *tangent, position));
        }

        let font_size = self.font_size();
        let sizes: Vec<Size> = placed
            .iter()
            .map(|(item, ..)| self.config.label_size(&item.label, font_size))
            .collect();
        let outcome = resolve_collisions(
            placed.iter().map(|(.., position)| *position).collect(),
            &sizes,
            self.config.collision_min_distance,
            self.config.collision_max_iterations,
        );

        let mut labels = Group::new("labels");
        for ((item, outward, tangent, _), position) in placed.iter().zip(outcome.positions) {
            let orientation = resolve_orientation(*outward);
            let rotation = item
                .rotation
                .then(|| Rotation::new(*tangent, position));
            labels.push(Primitive::text(
                item.label.as_str(),
                position,
                orientation.anchor,
                orientation.dy,
                rotation,
                self.text_style(),
            ));
        }

        vec![path, items, labels]
    }

    // ============================================
    // Mandala
    // ============================================

    fn mandala(&self, mandala: &MandalaSpec) -> Vec<Group> {
        let center = self.center();
        let reach = mandala
            .layers
            .iter()
            .map(|layer| layer.radius + layer.size / 2.0)
            .fold(None, |max: Option<f64>, r| Some(max.map_or(r, |m| m.max(r))))
            .unwrap_or_else(|| self.radius());

        let mut axes = Group::new("axes");
        let axis_style = Style::stroked(self.color("stroke-3"), self.config.stroke_width / 2.0);
        for (i, line) in axis_lines(center, reach, mandala.axes, mandala.start_angle)
            .into_iter()
            .enumerate()
        {
            axes.push(Primitive::line(
                Some(format!("axis-{i}")),
                line.from,
                line.to,
                axis_style.clone(),
            ));
        }

        let mut groups = vec![axes];
        for (n, layer) in mandala.layers.iter().enumerate() {
            let mut group = Group::new(format!("layer-{}", n + 1));
            let element_style = Style::filled(self.color("accent-1"));
            let half = layer.size / 2.0;

            let elements = layer_elements(center, layer, mandala.axes, mandala.start_angle);
            let mut texts = Vec::new();
            for (i, element) in elements.iter().enumerate() {
                let id = Some(format!("layer-{}-element-{i}", n + 1));
                let rotation = element
                    .rotation
                    .map(|angle| Rotation::new(angle, element.position));
                let shape = match rotation {
                    Some(rotation) => {
                        let p = element.position;
                        let corners = [
                            Point::new(p.x - half, p.y - half),
                            Point::new(p.x + half, p.y - half),
                            Point::new(p.x + half, p.y + half),
                            Point::new(p.x - half, p.y + half),
                        ]
                        .map(|corner| rotation.transform_point(corner));
                        Primitive::polyline(id, &corners, true, element_style.clone())
                    }
                    None => Primitive::circle(id, element.position, half, element_style.clone()),
                };
                group.push(shape);

                if let Some(label) = element.label.as_deref().filter(|l| !l.is_empty()) {
                    texts.push(self.centered_text(label, element.position, rotation));
                }
            }
            group.children.extend(texts);
            groups.push(group);
        }

        groups
    }
}
