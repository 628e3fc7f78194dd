use super::DamageSignal;

/// Consumer of host signals. Handlers are invoked one signal at a time
/// from a single thread of control and must not block.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &DamageSignal);

    fn handle_signals(&mut self, signals: &[DamageSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
