use std::sync::Arc;

use crate::channels::UpdateChannel;
use crate::contracts::Model;

use super::{config::ControllerConfig, mediator::Controller};

/// Builder for constructing a [`Controller`] with a model and initial channels.
///
/// The builder keeps strong handles only until [`build`](Self::build); the
/// controller itself holds weak references, so the caller must keep the model
/// and channels alive.
pub struct ControllerBuilder {
    cfg: ControllerConfig,
    model: Option<Arc<dyn Model>>,
    channels: Vec<Arc<dyn UpdateChannel>>,
}

impl ControllerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: ControllerConfig) -> Self {
        Self {
            cfg,
            model: None,
            channels: Vec::new(),
        }
    }

    /// Sets the model that will receive drained actions.
    pub fn with_model(mut self, model: &Arc<dyn Model>) -> Self {
        self.model = Some(Arc::clone(model));
        self
    }

    /// Adds update channels registered at build time (duplicates collapse).
    pub fn with_channels(mut self, channels: &[Arc<dyn UpdateChannel>]) -> Self {
        self.channels.extend(channels.iter().cloned());
        self
    }

    /// Builds and returns the shared controller.
    pub fn build(self) -> Arc<Controller> {
        let controller = Arc::new(Controller::new(self.cfg));

        if let Some(model) = &self.model {
            controller.register_model(model);
        }
        for channel in &self.channels {
            controller.register_update_channel(channel);
        }
        controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionCommand, PropertyChange};

    struct Sink;

    impl UpdateChannel for Sink {
        fn deliver(&self, _change: PropertyChange) {}
    }

    struct Noop;

    impl Model for Noop {
        fn handle_action(&self, _action: ActionCommand) {}
    }

    #[test]
    fn test_build_registers_model_and_deduplicates_channels() {
        let model: Arc<dyn Model> = Arc::new(Noop);
        let ch: Arc<dyn UpdateChannel> = Arc::new(Sink);

        let ctrl = Controller::builder(ControllerConfig::default())
            .with_model(&model)
            .with_channels(&[Arc::clone(&ch), Arc::clone(&ch)])
            .build();

        assert_eq!(ctrl.channel_count(), 1);
        ctrl.submit("go", true).unwrap();
        assert_eq!(ctrl.drain_actions(), 1);
    }
}
