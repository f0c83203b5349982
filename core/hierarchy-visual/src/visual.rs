//! FILENAME: core/hierarchy-visual/src/visual.rs
//! PURPOSE: The visual instance the host constructs once and updates on
//! every data or view change.
//! CONTEXT: This is the single adapter boundary. The host's data views go
//! through `visual_transform`, settings are re-parsed, and the tree walker
//! brings the element tree under the host's target element up to date.
//! Missing data is a silent no-op; nothing here returns an error.

use dataview::{EnumerateVisualObjectInstancesOptions, VisualObjectInstance, VisualUpdateOptions};
use render_tree::{Document, ElementId};
use crate::settings::VisualSettings;
use crate::transform::visual_transform;
use crate::tree_walker::{reconcile, replace_root};
use crate::view_model::VisualViewModel;

/// What the host passes when constructing the visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualConstructorOptions {
    /// The host-owned element the visual renders under.
    pub element: ElementId,
}

/// The hierarchy tree visual.
#[derive(Debug)]
pub struct Visual {
    /// Host element the root container is placed under.
    target: ElementId,
    /// Settings from the last applied update; `None` before the first one.
    settings: Option<VisualSettings>,
    /// The root container created by the last applied update.
    root: Option<ElementId>,
}

impl Visual {
    pub fn new(options: VisualConstructorOptions) -> Self {
        Visual {
            target: options.element,
            settings: None,
            root: None,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    pub fn settings(&self) -> Option<&VisualSettings> {
        self.settings.as_ref()
    }

    /// Host entry point: transform the first data view and render it.
    pub fn update(&mut self, doc: &mut Document, options: &VisualUpdateOptions) {
        log::debug!(
            "update: {} data view(s), viewport {}x{}",
            options.data_views.len(),
            options.viewport.width,
            options.viewport.height
        );
        let view_model = visual_transform(&options.data_views);
        self.update_internal(doc, options, view_model.as_ref());
    }

    /// Renders `view_model` using settings from `options`.
    ///
    /// Does nothing (and leaves the previous tree untouched) when there is
    /// no view model or the first data view has no matrix.
    pub fn update_internal(
        &mut self,
        doc: &mut Document,
        options: &VisualUpdateOptions,
        view_model: Option<&VisualViewModel>,
    ) {
        let data_view = options.primary_data_view();
        let has_matrix = data_view.is_some_and(|dv| dv.matrix.is_some());
        let Some(view_model) = view_model.filter(|_| has_matrix) else {
            log::debug!("update skipped: no usable matrix");
            return;
        };

        let settings = VisualSettings::parse(data_view);
        self.render(doc, view_model, settings);
    }

    /// Replaces the root container and reconciles the category tree under it.
    ///
    /// `settings` become the visual's current settings only once a root has
    /// been created; a stale target leaves the visual as it was.
    pub fn render(&mut self, doc: &mut Document, view_model: &VisualViewModel, settings: VisualSettings) {
        let Some(root) = replace_root(doc, self.target) else {
            log::debug!("render skipped: target {:?} is gone", self.target);
            return;
        };
        self.root = Some(root);

        let dp = &settings.data_point;
        doc.set_style(root, "font-size", format!("{}px", dp.font_size));
        if let Some(color) = dp.effective_color() {
            doc.set_style(root, "color", color);
        }
        self.settings = Some(settings);

        reconcile(doc, root, &view_model.categories, 0);
        log::trace!("render: {} nodes, document holds {} elements", view_model.node_count(), doc.len());
    }

    /// Property pane entry point; reflects the current or default settings.
    pub fn enumerate_object_instances(
        &self,
        options: &EnumerateVisualObjectInstancesOptions,
    ) -> Vec<VisualObjectInstance> {
        match &self.settings {
            Some(settings) => settings.enumerate_object_instances(options),
            None => VisualSettings::get_default().enumerate_object_instances(options),
        }
    }
}
