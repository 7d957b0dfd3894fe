// Copyright 2025 the Watermark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attaching a rendered tile to a target surface.
//!
//! Placement is expressed as CSS declarations so it is independent of any
//! particular host. A [`Surface`] applies them:
//! - [`PlacementMode::Mat`] writes the tile as the carrier's own repeating
//!   background, and
//! - [`PlacementMode::Cover`] installs an absolutely positioned, full-size layer
//!   above the carrier and repeats the tile there.
//!
//! All declarations are `!important` so host styles cannot hide the watermark.
//! Cover layers stack in install order: a later layer paints over an earlier
//! one with the same `z-index`.

use std::collections::BTreeMap;
use std::fmt;

use crate::WatermarkOptions;

/// How a rendered tile is attached to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlacementMode {
    /// Background of the carrier itself.
    #[default]
    Mat,
    /// A new layer covering the carrier.
    Cover,
}

/// Which image is being placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The watermark tile.
    Tile,
    /// The diagnostic overlay used while tuning.
    Tuning,
}

/// One CSS declaration, always emitted as `!important`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleDeclaration {
    /// CSS property name.
    pub property: &'static str,
    /// CSS value.
    pub value: String,
}

impl StyleDeclaration {
    fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

impl fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}!important", self.property, self.value)
    }
}

/// Where the declarations of a [`Placement`] go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementTarget {
    /// The carrier element itself.
    Carrier,
    /// A layer element with this id, created on first install.
    Overlay {
        /// Element id.
        id: String,
    },
}

/// Declarations needed to show one image on a surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Element receiving `declarations`.
    pub target: PlacementTarget,
    /// Background (and, for overlays, positioning) declarations.
    pub declarations: Vec<StyleDeclaration>,
    /// Declarations the carrier needs so an overlay can cover it.
    pub carrier_declarations: Vec<StyleDeclaration>,
}

impl Placement {
    /// The overlay element id, if this placement creates one.
    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        match &self.target {
            PlacementTarget::Carrier => None,
            PlacementTarget::Overlay { id } => Some(id),
        }
    }

    /// `declarations` as inline style text.
    #[must_use]
    pub fn css_text(&self) -> String {
        css_text(&self.declarations)
    }
}

fn css_text(declarations: &[StyleDeclaration]) -> String {
    declarations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Element id of a layer for the watermark called `name`.
#[must_use]
pub fn layer_id(name: &str, layer: Layer) -> String {
    match layer {
        Layer::Tile => name.to_owned(),
        Layer::Tuning => format!("{name}-tuning"),
    }
}

/// Computes how to show `image_url` according to `options`.
#[must_use]
pub fn place(image_url: &str, options: &WatermarkOptions, layer: Layer) -> Placement {
    let mut declarations = vec![
        StyleDeclaration::new("-webkit-print-color-adjust", "exact"),
        StyleDeclaration::new("print-color-adjust", "exact"),
        StyleDeclaration::new("color-adjust", "exact"),
        StyleDeclaration::new("background-image", format!("url({image_url})")),
        StyleDeclaration::new("background-position", options.position.as_str()),
        StyleDeclaration::new("background-repeat", options.repeat.as_str()),
    ];
    if let Some(size) = &options.size {
        declarations.push(StyleDeclaration::new("background-size", size.as_str()));
    }

    match options.mode {
        PlacementMode::Mat => Placement {
            target: PlacementTarget::Carrier,
            declarations,
            carrier_declarations: Vec::new(),
        },
        PlacementMode::Cover => {
            declarations.extend([
                StyleDeclaration::new("pointer-events", "none"),
                StyleDeclaration::new("position", "absolute"),
                StyleDeclaration::new("top", "0"),
                StyleDeclaration::new("left", "0"),
                StyleDeclaration::new("z-index", options.z_index.to_string()),
                StyleDeclaration::new("width", "100%"),
                StyleDeclaration::new("height", "100%"),
            ]);
            Placement {
                target: PlacementTarget::Overlay {
                    id: layer_id(&options.name, layer),
                },
                declarations,
                carrier_declarations: vec![StyleDeclaration::new("position", "relative")],
            }
        }
    }
}

/// A host surface that can receive placements.
pub trait Surface {
    /// Applies `placement`. Installing the same overlay id again replaces it.
    fn install(&mut self, placement: &Placement);
}

/// An in-memory [`Surface`] that records the resulting inline styles.
///
/// Later declarations of a property replace earlier ones, as they would in an
/// element's style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSheetSurface {
    carrier: BTreeMap<&'static str, String>,
    /// Overlay layers in first-install order; later layers paint on top.
    overlays: Vec<(String, BTreeMap<&'static str, String>)>,
}

impl StyleSheetSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inline style text of the carrier.
    #[must_use]
    pub fn carrier_css(&self) -> String {
        map_css(&self.carrier)
    }

    /// Inline style text of the overlay `id`, if installed.
    #[must_use]
    pub fn overlay_css(&self, id: &str) -> Option<String> {
        self.overlays
            .iter()
            .find(|(overlay, _)| overlay == id)
            .map(|(_, declarations)| map_css(declarations))
    }

    /// Ids of every installed overlay, in install order.
    ///
    /// Re-installing an id keeps its original position.
    pub fn overlay_ids(&self) -> impl Iterator<Item = &str> {
        self.overlays.iter().map(|(id, _)| id.as_str())
    }

    /// Value of `property` on the carrier.
    #[must_use]
    pub fn carrier_property(&self, property: &str) -> Option<&str> {
        self.carrier.get(property).map(String::as_str)
    }
}

impl Surface for StyleSheetSurface {
    fn install(&mut self, placement: &Placement) {
        let declarations = match &placement.target {
            PlacementTarget::Carrier => &mut self.carrier,
            PlacementTarget::Overlay { id } => {
                for d in &placement.carrier_declarations {
                    self.carrier.insert(d.property, d.value.clone());
                }
                let index = match self.overlays.iter().position(|(overlay, _)| overlay == id) {
                    Some(index) => index,
                    None => {
                        self.overlays.push((id.clone(), BTreeMap::new()));
                        self.overlays.len() - 1
                    }
                };
                let overlay = &mut self.overlays[index].1;
                overlay.clear();
                overlay
            }
        };
        for d in &placement.declarations {
            declarations.insert(d.property, d.value.clone());
        }
    }
}

fn map_css(map: &BTreeMap<&'static str, String>) -> String {
    let declarations: Vec<_> = map
        .iter()
        .map(|(&property, value)| StyleDeclaration::new(property, value.as_str()))
        .collect();
    css_text(&declarations)
}
