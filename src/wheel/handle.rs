use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info, warn};

use crate::items::Item;
use crate::wheel::spin::{PickController, SpinPlan};
use crate::wheel::state::{Phase, WheelState};
use crate::wheel::window::VisibleSlot;
use crate::wheel::{WheelConfig, WheelError};

pub type SettledCallback = Arc<dyn Fn(&Item) + Send + Sync>;

/// A wheel the UI can start, watch and cancel.
///
/// Each spin runs as one tokio task that owns the wheel state and publishes
/// a snapshot after every change. The handle only reads those snapshots.
/// Dropping the handle cancels a running spin.
pub struct WheelHandle {
    config: WheelConfig,
    items: Arc<[Item]>,
    state: watch::Receiver<WheelState>,
    task: Option<JoinHandle<()>>,
    on_settled: Option<SettledCallback>,
    rng: StdRng,
}

impl WheelHandle {
    pub fn new(items: impl IntoIterator<Item = Item>, config: WheelConfig) -> Self {
        Self::with_rng(items, config, StdRng::from_entropy())
    }

    pub fn with_seed(items: impl IntoIterator<Item = Item>, config: WheelConfig, seed: u64) -> Self {
        Self::with_rng(items, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(items: impl IntoIterator<Item = Item>, config: WheelConfig, rng: StdRng) -> Self {
        let items: Arc<[Item]> = items.into_iter().collect();
        let (_, state) = watch::channel(WheelState::new(Arc::clone(&items)));
        Self {
            config,
            items,
            state,
            task: None,
            on_settled: None,
            rng,
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Replaces the item list. Rejected while a spin is running.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item>) -> Result<(), WheelError> {
        if self.is_spinning() {
            return Err(WheelError::AlreadySpinning);
        }
        self.items = items.into_iter().collect();
        self.publish_local(WheelState::new(Arc::clone(&self.items)));
        Ok(())
    }

    /// Registers the callback fired when a spin settles. A spin uses the
    /// callback that was registered when it started.
    pub fn on_settled<F>(&mut self, callback: F)
    where
        F: Fn(&Item) + Send + Sync + 'static,
    {
        self.on_settled = Some(Arc::new(callback));
    }

    /// Starts a spin towards a uniformly random item.
    pub fn start(&mut self) -> Result<SpinPlan, WheelError> {
        self.check_can_start()?;
        let target = self.rng.gen_range(0..self.items.len());
        self.start_towards(target)
    }

    /// Starts a spin that settles on `target_index`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_towards(&mut self, target_index: usize) -> Result<SpinPlan, WheelError> {
        self.check_can_start()?;
        let mut controller = PickController::new(Arc::clone(&self.items));
        let plan = controller.begin(target_index, &self.config)?;

        let (tx, rx) = watch::channel(controller.state().clone());
        self.state = rx;
        info!(
            items = self.items.len(),
            target = plan.target_index,
            ticks = plan.total_ticks,
            duration_ms = plan.duration(self.config.tick).as_millis() as u64,
            "spin started"
        );
        self.task = Some(tokio::spawn(drive(
            controller,
            plan,
            self.config.tick,
            tx,
            self.on_settled.clone(),
        )));
        Ok(plan)
    }

    fn check_can_start(&self) -> Result<(), WheelError> {
        let result = if self.is_spinning() {
            Err(WheelError::AlreadySpinning)
        } else if self.items.len() <= 1 {
            Err(WheelError::NotEnoughItems { len: self.items.len() })
        } else {
            Ok(())
        };
        if let Err(err) = &result {
            warn!(kind = ?err.kind(), %err, "spin rejected");
        }
        result
    }

    /// Tears down a running spin. No settlement callback fires for it.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if self.is_spinning() {
            info!(ticks = self.state.borrow().ticks, "spin cancelled");
            self.publish_local(WheelState::new(Arc::clone(&self.items)));
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.state.borrow().is_spinning()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase.clone()
    }

    pub fn state(&self) -> WheelState {
        self.state.borrow().clone()
    }

    pub fn settled_item(&self) -> Option<Item> {
        self.state.borrow().chosen_item().cloned()
    }

    pub fn visible_slots(&self) -> Vec<VisibleSlot> {
        self.state.borrow().visible_slots(self.config.radius)
    }

    /// Manual stepping for the debug view. Rejected while spinning.
    pub fn step_forward(&mut self) -> Result<(), WheelError> {
        self.step(WheelState::step_forward)
    }

    pub fn step_backward(&mut self) -> Result<(), WheelError> {
        let radius = self.config.radius;
        self.step(|state| state.step_backward(radius))
    }

    fn step(&mut self, apply: impl FnOnce(&mut WheelState)) -> Result<(), WheelError> {
        if self.is_spinning() {
            return Err(WheelError::AlreadySpinning);
        }
        let mut next = self.state();
        apply(&mut next);
        self.publish_local(next);
        Ok(())
    }

    fn publish_local(&mut self, state: WheelState) {
        let (_, rx) = watch::channel(state);
        self.state = rx;
    }
}

impl Drop for WheelHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn drive(
    mut controller: PickController,
    plan: SpinPlan,
    tick: Duration,
    tx: watch::Sender<WheelState>,
    on_settled: Option<SettledCallback>,
) {
    let start = Instant::now();
    let mut ticker = time::interval_at(start + tick, tick);
    let deadline = time::sleep_until(start + plan.duration(tick));
    tokio::pin!(deadline);

    // Settle only once the deadline has passed and every tick has been seen.
    let mut deadline_passed = false;
    while !(deadline_passed && controller.ticks_remaining() == 0) {
        tokio::select! {
            biased;
            _ = ticker.tick(), if controller.ticks_remaining() > 0 => {
                controller.on_tick();
                let state = controller.state();
                debug!(index = state.current_index, rotation = state.rotation, tick = state.ticks, "tick");
                tx.send_replace(state.clone());
            }
            _ = &mut deadline, if !deadline_passed => {
                deadline_passed = true;
            }
        }
    }

    controller.on_deadline();
    let chosen = controller.settle();
    tx.send_replace(controller.state().clone());

    if let Some(item) = chosen {
        info!(index = plan.target_index, title = %item.title, "spin settled");
        if let Some(callback) = on_settled {
            callback(&item);
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn items(titles: &[&str]) -> Vec<Item> {
        titles.iter().map(|t| Item::new(*t)).collect()
    }

    fn recording(handle: &mut WheelHandle) -> mpsc::UnboundedReceiver<Item> {
        let (tx, rx) = mpsc::unbounded_channel();
        handle.on_settled(move |item| {
            let _ = tx.send(item.clone());
        });
        rx
    }

    #[tokio::test(start_paused = true)]
    async fn settles_once_on_forced_target() {
        let config = WheelConfig::default();
        let mut handle = WheelHandle::new(items(&["X", "Y"]), config);
        let mut settled = recording(&mut handle);

        let started = Instant::now();
        let plan = handle.start_towards(1).unwrap();
        assert!(handle.is_spinning());

        let item = settled.recv().await.unwrap();
        let elapsed = started.elapsed();
        assert_eq!(item.title, "Y");
        assert!(elapsed >= plan.duration(config.tick));
        assert!(elapsed < plan.duration(config.tick) + config.tick);
        assert!(!handle.is_spinning());
        assert_eq!(handle.settled_item().map(|i| i.title), Some("Y".to_string()));

        time::sleep(plan.duration(config.tick) * 2).await;
        assert!(settled.try_recv().is_err());
        assert!(!handle.is_spinning());
    }

    #[tokio::test(start_paused = true)]
    async fn every_target_is_reached_without_a_snap() {
        let titles = ["A", "B", "C", "D", "E"];
        for target in 0..titles.len() {
            let mut handle = WheelHandle::new(items(&titles), WheelConfig::default());
            let mut settled = recording(&mut handle);
            let plan = handle.start_towards(target).unwrap();

            let item = settled.recv().await.unwrap();
            let state = handle.state();
            assert_eq!(item.title, titles[target]);
            assert_eq!(state.current_index, target);
            assert_eq!(state.ticks, plan.total_ticks);
            assert_eq!(state.phase, Phase::Stopped { chosen: target });
        }
    }

    #[tokio::test(start_paused = true)]
    async fn random_start_settles_on_its_plan() {
        let mut handle = WheelHandle::with_seed(items(&["A", "B", "C"]), WheelConfig::default(), 42);
        let mut settled = recording(&mut handle);
        let plan = handle.start().unwrap();
        assert!(plan.target_index < 3);

        let item = settled.recv().await.unwrap();
        assert_eq!(item, handle.items()[plan.target_index]);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_publish_forward_steps() {
        let config = WheelConfig::default();
        let mut handle = WheelHandle::new(items(&["A", "B", "C"]), config);
        handle.start_towards(2).unwrap();

        time::sleep(config.tick * 4 + config.tick / 2).await;
        let state = handle.state();
        assert_eq!(state.ticks, 4);
        assert_eq!(state.current_index, 1);
        assert_eq!(state.rotation, 1);
        assert_eq!(handle.visible_slots().len(), 2 * config.radius + 1);
    }

    #[test]
    fn single_item_is_rejected_and_stays_idle() {
        let mut handle = WheelHandle::new(items(&["only"]), WheelConfig::default());
        assert_eq!(handle.start(), Err(WheelError::NotEnoughItems { len: 1 }));
        assert_eq!(handle.phase(), Phase::Idle);
        assert!(!handle.is_spinning());

        let mut empty = WheelHandle::new(Vec::new(), WheelConfig::default());
        assert_eq!(empty.start(), Err(WheelError::NotEnoughItems { len: 0 }));
        assert!(empty.visible_slots().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_mid_spin_stops_ticks_and_callbacks() {
        let config = WheelConfig::default();
        let mut handle = WheelHandle::new(items(&["A", "B", "C"]), config);
        let mut settled = recording(&mut handle);
        let plan = handle.start_towards(1).unwrap();

        time::sleep(config.tick * 2 + config.tick / 2).await;
        assert_eq!(handle.state().ticks, 2);

        handle.cancel();
        let after_cancel = handle.state();
        assert_eq!(after_cancel.phase, Phase::Idle);
        assert!(!handle.is_spinning());

        time::sleep(plan.duration(config.tick) * 2).await;
        assert_eq!(handle.state(), after_cancel);
        assert!(settled.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_spin() {
        let config = WheelConfig::default();
        let mut handle = WheelHandle::new(items(&["A", "B"]), config);
        let mut settled = recording(&mut handle);
        let plan = handle.start_towards(0).unwrap();
        drop(handle);

        time::sleep(plan.duration(config.tick) * 2).await;
        assert!(settled.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_while_spinning_is_rejected() {
        let config = WheelConfig::default();
        let mut handle = WheelHandle::new(items(&["A", "B", "C"]), config);
        let plan = handle.start_towards(1).unwrap();
        time::sleep(config.tick + config.tick / 2).await;

        let before = handle.state();
        assert_eq!(handle.start_towards(2), Err(WheelError::AlreadySpinning));
        assert_eq!(handle.set_items(items(&["Z", "W"])), Err(WheelError::AlreadySpinning));
        assert_eq!(handle.step_forward(), Err(WheelError::AlreadySpinning));
        assert_eq!(handle.state(), before);
        assert_eq!(handle.phase(), Phase::Spinning { target_index: 1, total_ticks: plan.total_ticks });
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_wheel_spins_again() {
        let mut handle = WheelHandle::new(items(&["A", "B", "C"]), WheelConfig::default());
        let mut settled = recording(&mut handle);
        handle.start_towards(2).unwrap();
        assert_eq!(settled.recv().await.unwrap().title, "C");

        handle.start_towards(0).unwrap();
        assert_eq!(handle.state().ticks, 0);
        assert_eq!(settled.recv().await.unwrap().title, "A");
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_tick_is_rejected_before_any_timer_starts() {
        let config = WheelConfig {
            tick: Duration::from_millis(u64::MAX),
            ..WheelConfig::default()
        };
        let mut handle = WheelHandle::with_seed(items(&["A", "B"]), config, 7);
        assert!(matches!(handle.start(), Err(WheelError::SpinTooLong { .. })));
        assert_eq!(handle.phase(), Phase::Idle);
        assert!(!handle.is_spinning());
    }

    #[test]
    fn debug_stepping_moves_the_window() {
        let mut handle = WheelHandle::new(items(&["A", "B", "C", "D"]), WheelConfig { radius: 1, ..WheelConfig::default() });
        let order = |h: &WheelHandle| h.visible_slots().iter().map(|s| s.item_index).collect::<Vec<_>>();
        assert_eq!(order(&handle), vec![3, 0, 1]);

        handle.step_forward().unwrap();
        assert_eq!(order(&handle), vec![0, 1, 2]);

        handle.step_backward().unwrap();
        handle.step_backward().unwrap();
        assert_eq!(handle.state().current_index, 3);
        assert_eq!(order(&handle), vec![2, 3, 0]);
    }

    #[test]
    fn set_items_resets_the_wheel() {
        let mut handle = WheelHandle::new(items(&["A", "B"]), WheelConfig::default());
        handle.step_forward().unwrap();
        handle.set_items(items(&["C", "D", "E"])).unwrap();
        assert_eq!(handle.items().len(), 3);
        assert_eq!(handle.state().current_index, 0);
    }
}
