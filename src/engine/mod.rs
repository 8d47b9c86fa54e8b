//! Host-facing dashboard engine.
//!
//! Owns the grid model, card registry and drag state; the host feeds it
//! pointer input and explicit calls, and reads back the container tree.
//! All mutation happens on the caller's thread; nothing blocks.

use std::sync::Arc;
use std::time::Instant;

use blake3::Hash;
use serde_json::{Value, json};

use crate::builder::{ContainerTree, build};
use crate::cards::{CardTypes, StaticCardTypes};
use crate::codec::{DashboardItem, decode, digest, encode};
use crate::config::{EngineConfig, HapticCue};
use crate::drag::{DragContext, DragEffect, DragEnd, DragInput, DragPhase, DragState, transition};
use crate::geometry::{Point, Size, SolvedLayout, solve};
use crate::grid::{CardId, GridModel, GridPosition};
use crate::haptics::{Haptics, NullHaptics};
use crate::input::PointerInput;
use crate::logging::{LogLevel, event_with_fields, json_kv};
use crate::metrics::{EngineMetrics, MetricSnapshot};
use crate::reducer::move_card;
use crate::registry::{CardRegistry, CardView};
use crate::store::{LayoutStore, MemoryStore};

const ENGINE_TARGET: &str = "dashgrid::engine";
const DRAG_TARGET: &str = "dashgrid::drag";
const STORE_TARGET: &str = "dashgrid::store";

/// Visual state of the lifted card while dragging.
#[derive(Debug, Clone, PartialEq)]
pub struct DragVisual {
    pub card: CardId,
    pub offset: Point,
    pub scale: f32,
    pub alpha: f32,
}

#[derive(Default)]
struct EngineCallbacks {
    layout_changed: Option<Box<dyn FnMut()>>,
    edit_mode_changed: Option<Box<dyn FnMut(bool)>>,
}

pub struct DashboardEngine {
    model: GridModel,
    registry: CardRegistry,
    tree: ContainerTree,
    solved: SolvedLayout,
    drag: DragState,
    visual: Option<DragVisual>,
    edit_mode: bool,
    scroll_locked: bool,
    drop_zone_visible: bool,
    viewport: Size,
    config: EngineConfig,
    store: Box<dyn LayoutStore>,
    haptics: Box<dyn Haptics>,
    card_types: Box<dyn CardTypes>,
    callbacks: EngineCallbacks,
    last_saved: Hash,
    started: Instant,
}

impl DashboardEngine {
    pub fn new(config: EngineConfig) -> Self {
        let viewport = config.settings.viewport;
        let mut engine = Self {
            model: GridModel::new(),
            registry: CardRegistry::new(),
            tree: ContainerTree::default(),
            solved: SolvedLayout::default(),
            drag: DragState::Idle,
            visual: None,
            edit_mode: false,
            scroll_locked: false,
            drop_zone_visible: false,
            viewport,
            config,
            store: Box::new(MemoryStore::new()),
            haptics: Box::new(NullHaptics),
            card_types: Box::new(StaticCardTypes::new()),
            callbacks: EngineCallbacks::default(),
            last_saved: digest(&[]),
            started: Instant::now(),
        };
        engine.rebuild();
        engine
    }

    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: LayoutStore + 'static,
    {
        self.store = Box::new(store);
        self
    }

    pub fn with_haptics<H>(mut self, haptics: H) -> Self
    where
        H: Haptics + 'static,
    {
        self.haptics = Box::new(haptics);
        self
    }

    pub fn with_card_types<T>(mut self, card_types: T) -> Self
    where
        T: CardTypes + 'static,
    {
        self.card_types = Box::new(card_types);
        self
    }

    /// Called after every change that triggers a persistence write.
    pub fn on_layout_changed(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callbacks.layout_changed = Some(Box::new(callback));
        self
    }

    pub fn on_edit_mode_changed(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.callbacks.edit_mode_changed = Some(Box::new(callback));
        self
    }

    /// Register (or replace) the component for `id`. Grid placement is
    /// unchanged; a drag of the replaced component cancels on its next input.
    pub fn register_card(&mut self, id: impl Into<CardId>, view: Arc<dyn CardView>) {
        let id = id.into();
        let replaced = self.registry.register(id.clone(), view);
        self.log(
            LogLevel::Debug,
            ENGINE_TARGET,
            "card_registered",
            [json_kv("card", json!(id)), json_kv("replaced", json!(replaced))],
        );
        self.rebuild();
    }

    pub fn unregister_card(&mut self, id: &str) -> Option<Arc<dyn CardView>> {
        let removed = self.registry.unregister(id);
        if removed.is_some() {
            self.rebuild();
        }
        removed
    }

    /// Replace the whole layout. Any drag in progress is cancelled first.
    /// The applied layout becomes the persistence baseline.
    pub fn apply_layout(&mut self, items: &[DashboardItem]) {
        if self.drag.is_active() {
            self.dispatch(DragInput::Cancel);
        }
        self.model = decode(items);
        self.last_saved = digest(&encode(&self.model));
        self.rebuild();
        self.log(
            LogLevel::Info,
            ENGINE_TARGET,
            "layout_applied",
            [
                json_kv("items", json!(items.len())),
                json_kv("rows", json!(self.model.row_count())),
            ],
        );
    }

    /// Apply the stored layout, if any. Load failures keep the current
    /// layout. Returns true when a stored layout was applied.
    pub fn load_from_store(&mut self) -> bool {
        match self.store.load() {
            Ok(Some(items)) => {
                self.apply_layout(&items);
                true
            }
            Ok(None) => false,
            Err(err) => {
                self.log(
                    LogLevel::Warn,
                    STORE_TARGET,
                    "load_failed",
                    [json_kv("error", json!(err.to_string()))],
                );
                false
            }
        }
    }

    pub fn enter_edit_mode(&mut self) {
        if self.edit_mode {
            return;
        }
        self.edit_mode = true;
        self.play(self.config.settings.edit_mode_cue);
        self.rebuild();
        self.log(LogLevel::Info, ENGINE_TARGET, "edit_mode_entered", std::iter::empty());
        if let Some(callback) = self.callbacks.edit_mode_changed.as_mut() {
            callback(true);
        }
    }

    /// Leave edit mode: cancel any drag, persist if the layout changed and
    /// rebuild without edit decoration.
    pub fn exit_edit_mode(&mut self) {
        if !self.edit_mode {
            return;
        }
        if self.drag.is_active() {
            self.dispatch(DragInput::Cancel);
        }
        self.edit_mode = false;
        self.persist();
        self.rebuild();
        self.log(LogLevel::Info, ENGINE_TARGET, "edit_mode_exited", std::iter::empty());
        if let Some(callback) = self.callbacks.edit_mode_changed.as_mut() {
            callback(false);
        }
    }

    /// Pointer down on the drag handle bound to `position`. Ignored outside
    /// edit mode, while a drag is active, or when no handle is rendered there.
    pub fn press_handle(&mut self, position: GridPosition, point: Point) {
        let Some(handle) = self.tree.handle_at(position) else {
            return;
        };
        let card = handle.card.clone();
        let position = handle.position;
        let Some(generation) = self.registry.generation(&card) else {
            return;
        };
        self.dispatch(DragInput::Press {
            card,
            position,
            point,
            generation,
        });
    }

    pub fn pointer_move(&mut self, point: Point) {
        if !self.drag.is_active() {
            return;
        }
        self.with_metrics(EngineMetrics::record_pointer_move);
        self.dispatch(DragInput::Move(point));
    }

    pub fn pointer_up(&mut self) {
        self.dispatch(DragInput::Release);
    }

    /// Host-driven cancellation (gesture interrupted).
    pub fn cancel_drag(&mut self) {
        self.dispatch(DragInput::Cancel);
    }

    /// Route raw pointer input, hit-testing drag handles on press.
    pub fn handle_pointer(&mut self, input: PointerInput) {
        match input {
            PointerInput::Down(point) => {
                if let Some(position) = self.solved.handle_at(point) {
                    self.press_handle(position, point);
                }
            }
            PointerInput::Move(point) => self.pointer_move(point),
            PointerInput::Up(_) => self.pointer_up(),
            PointerInput::Cancel => self.cancel_drag(),
        }
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.solved = solve(&self.tree, viewport, &self.config.settings);
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// True only once a press has crossed the movement threshold.
    pub fn is_dragging(&self) -> bool {
        self.drag.phase() == DragPhase::Dragging
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn drop_target(&self) -> Option<GridPosition> {
        self.drag.session().map(|session| session.drop_target)
    }

    pub fn drag_visual(&self) -> Option<&DragVisual> {
        self.visual.as_ref()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn is_drop_zone_visible(&self) -> bool {
        self.drop_zone_visible
    }

    pub fn tree(&self) -> &ContainerTree {
        &self.tree
    }

    pub fn solved_layout(&self) -> &SolvedLayout {
        &self.solved
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Persistable snapshot of the current layout.
    pub fn snapshot(&self) -> Vec<DashboardItem> {
        encode(&self.model)
    }

    pub fn grid(&self) -> GridModel {
        self.model.clone()
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.started.elapsed()))
    }

    /// Log the current metrics snapshot, if both logging and metrics are on.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(snapshot)) =
            (self.config.logger.as_ref(), self.metrics_snapshot())
        {
            let _ = logger.log_event(snapshot.to_log_event(&self.config.metrics_target));
        }
    }

    fn dispatch(&mut self, input: DragInput) {
        let card_generation = self
            .drag
            .card()
            .and_then(|card| self.registry.generation(card));
        let ctx = DragContext {
            edit_mode: self.edit_mode,
            card_generation,
            bands: &self.solved.bands,
            width: self.solved.width,
            threshold: self.config.settings.drag_threshold,
            horizontal_damping: self.config.settings.horizontal_damping,
        };
        let state = std::mem::take(&mut self.drag);
        let (next, effects) = transition(state, input, &ctx);
        self.drag = next;
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: DragEffect) {
        match effect {
            DragEffect::Phase(phase) => {
                self.log(
                    LogLevel::Trace,
                    DRAG_TARGET,
                    "drag_phase",
                    [json_kv("phase", json!(format!("{phase:?}")))],
                );
            }
            DragEffect::Lift { card } => {
                self.with_metrics(EngineMetrics::record_drag_started);
                self.play(self.config.settings.drag_start_cue);
                self.log(
                    LogLevel::Info,
                    DRAG_TARGET,
                    "drag_started",
                    [json_kv("card", json!(card))],
                );
                self.visual = Some(DragVisual {
                    card,
                    offset: Point::default(),
                    scale: self.config.settings.lift_scale,
                    alpha: self.config.settings.lift_alpha,
                });
            }
            DragEffect::ScrollLock(locked) => self.scroll_locked = locked,
            DragEffect::DropZone(visible) => self.drop_zone_visible = visible,
            DragEffect::Translate { offset, .. } => {
                if let Some(visual) = self.visual.as_mut() {
                    visual.offset = offset;
                }
            }
            DragEffect::DropTarget { card, target } => {
                self.log(
                    LogLevel::Debug,
                    DRAG_TARGET,
                    "drop_target_changed",
                    [
                        json_kv("card", json!(card)),
                        json_kv("target", json!(target.to_string())),
                    ],
                );
            }
            DragEffect::Commit { card, from, to } => self.commit_move(&card, from, to),
            DragEffect::Restore { .. } => {
                if let Some(visual) = self.visual.as_mut() {
                    visual.offset = Point::default();
                }
            }
            DragEffect::Ended(end) => {
                self.visual = None;
                match end {
                    DragEnd::Cancelled => {
                        self.with_metrics(EngineMetrics::record_cancel);
                        self.log(
                            LogLevel::Info,
                            DRAG_TARGET,
                            "drag_cancelled",
                            std::iter::empty(),
                        );
                    }
                    DragEnd::NoOp => {
                        self.with_metrics(EngineMetrics::record_noop_commit);
                        self.log(
                            LogLevel::Info,
                            DRAG_TARGET,
                            "move_noop",
                            std::iter::empty(),
                        );
                    }
                    DragEnd::Moved | DragEnd::Tapped => {}
                }
            }
        }
    }

    fn commit_move(&mut self, card: &str, from: GridPosition, to: GridPosition) {
        let side_by_side = self.card_types.can_be_side_by_side(card);
        let next = move_card(&self.model, card, from, to, side_by_side);
        if next == self.model {
            return;
        }
        self.model = next;
        self.with_metrics(EngineMetrics::record_commit);
        self.rebuild();
        self.log(
            LogLevel::Info,
            ENGINE_TARGET,
            "move_committed",
            [
                json_kv("card", json!(card)),
                json_kv("from", json!(from.to_string())),
                json_kv("to", json!(to.to_string())),
                json_kv("rows", json!(self.model.row_count())),
            ],
        );
        self.persist();
        self.play(self.config.settings.move_cue);
    }

    /// Write the layout if it differs from the last written one. Failures
    /// are logged and otherwise ignored.
    fn persist(&mut self) {
        let items = encode(&self.model);
        let hash = digest(&items);
        if hash == self.last_saved {
            return;
        }
        match self.store.save(&items) {
            Ok(()) => {
                self.last_saved = hash;
                self.with_metrics(|metrics| metrics.record_persist(true));
                self.log(
                    LogLevel::Debug,
                    STORE_TARGET,
                    "layout_persisted",
                    [json_kv("items", json!(items.len()))],
                );
            }
            Err(err) => {
                self.with_metrics(|metrics| metrics.record_persist(false));
                self.log(
                    LogLevel::Warn,
                    STORE_TARGET,
                    "persist_failed",
                    [json_kv("error", json!(err.to_string()))],
                );
            }
        }
        if let Some(callback) = self.callbacks.layout_changed.as_mut() {
            callback();
        }
    }

    fn rebuild(&mut self) {
        self.tree = build(
            &self.model,
            &mut self.registry,
            self.edit_mode,
            self.config.settings.placeholder_height,
        );
        self.solved = solve(&self.tree, self.viewport, &self.config.settings);
        self.with_metrics(EngineMetrics::record_rebuild);
    }

    fn play(&self, cue: HapticCue) {
        if let Err(err) = self.haptics.play(cue) {
            self.log(
                LogLevel::Debug,
                ENGINE_TARGET,
                "haptics_failed",
                [json_kv("error", json!(err.to_string()))],
            );
        }
    }

    fn with_metrics(&self, record: impl FnOnce(&mut EngineMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, target: &str, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
