use crate::{
    codes::{KeyCategory, KeyCodes, Keystroke, Operator, RpnKey},
    error::CalcError,
    format::send_integer,
    input::InputBuffer,
    output::KeystrokeSink,
    stack::Stack,
};

/// How key events are interpreted. Number entry is the only mode so far
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProcessingState {
    #[default]
    NumberEntry,
}

struct Transition {
    next: ProcessingState,
    result: Result<(), CalcError>,
}

fn success_echo(op: Operator) -> &'static str {
    match op {
        Operator::Add => "+\n",
        Operator::Sub => "-\n",
        Operator::Neg => "-.\n",
        Operator::Mul => "*\n",
        Operator::Div => "/\n",
        Operator::Dup => "dup\n",
        Operator::Swap => "swap\n",
        // These print their values while they run
        Operator::Pop | Operator::Peek | Operator::List => "",
    }
}

/// The calculator context: pending digits, the value stack and the current
/// processing state. Owned by the host firmware.
///
/// Key handlers are async only so output can wait on a full keystroke
/// queue. The `&mut self` borrow keeps one event in flight at a time.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    input: InputBuffer,
    stack: Stack,
    state: ProcessingState,
}

impl Calculator {
    pub const fn new() -> Self {
        Self {
            input: InputBuffer::new(),
            stack: Stack::new(),
            state: ProcessingState::NumberEntry,
        }
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn state(&self) -> ProcessingState {
        self.state
    }

    pub fn reset(&mut self) {
        info!("Calculator reset");
        self.input.clear();
        self.stack.clear();
        self.state = ProcessingState::default();
    }

    /// Entry point for the host key handler. Only key-down events of
    /// calculator codes do anything. Errors have already been echoed to
    /// the sink when they are returned
    pub async fn on_key_event<S: KeystrokeSink>(
        &mut self,
        code: u16,
        pressed: bool,
        sink: &mut S,
    ) -> Result<(), CalcError> {
        if !pressed {
            return Ok(());
        }
        match RpnKey::try_from(code) {
            Ok(key) => self.handle_key(key, sink).await,
            Err(_) => {
                trace!("Ignoring non calculator code {}", code);
                Ok(())
            }
        }
    }

    pub async fn handle_key<S: KeystrokeSink>(
        &mut self,
        key: RpnKey,
        sink: &mut S,
    ) -> Result<(), CalcError> {
        let Transition { next, result } = match self.state {
            ProcessingState::NumberEntry => self.number_entry(key, sink).await,
        };
        if next != self.state {
            debug!("State {:?} -> {:?}", self.state, next);
            self.state = next;
        }
        result
    }

    async fn number_entry<S: KeystrokeSink>(&mut self, key: RpnKey, sink: &mut S) -> Transition {
        let result = match key.category() {
            KeyCategory::Digit(digit) => match self.input.record_digit(digit) {
                Ok(()) => {
                    if let Some(code) = KeyCodes::from_digit(digit) {
                        sink.emit_keystroke(Keystroke::plain(code)).await;
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            },
            KeyCategory::Backspace => {
                if self.input.backspace() {
                    sink.emit_keystroke(Keystroke::plain(KeyCodes::KeyboardBackspace))
                        .await;
                }
                Ok(())
            }
            KeyCategory::Enter => self.commit(sink).await,
            KeyCategory::Operator(op) => {
                // A dropped commit is already reported; the operator still runs
                let committed = self.commit(sink).await;
                self.operate(op, sink).await.and(committed)
            }
        };
        Transition {
            next: ProcessingState::NumberEntry,
            result,
        }
    }

    /// Moves pending digits onto the stack. Nothing happens when no digits
    /// are pending
    async fn commit<S: KeystrokeSink>(&mut self, sink: &mut S) -> Result<(), CalcError> {
        if self.input.is_empty() {
            return Ok(());
        }
        let value = self.input.drain_to_integer();
        match self.stack.push(value) {
            Ok(()) => {
                debug!("Committed {} | depth {}", value, self.stack.depth());
                sink.emit_text("<\n").await;
                Ok(())
            }
            Err(e) => Err(self.report(e, sink).await),
        }
    }

    async fn operate<S: KeystrokeSink>(
        &mut self,
        op: Operator,
        sink: &mut S,
    ) -> Result<(), CalcError> {
        let result = match op {
            Operator::Add => self.stack.add().map(drop),
            Operator::Sub => self.stack.sub().map(drop),
            Operator::Neg => self.stack.neg().map(drop),
            Operator::Mul => self.stack.mul().map(drop),
            Operator::Div => self.stack.div().map(drop),
            Operator::Dup => self.stack.dup().map(drop),
            Operator::Swap => self.stack.swap(),
            Operator::Pop => match self.stack.pop() {
                Some(value) => {
                    sink.emit_text("> ").await;
                    send_integer(sink, value).await;
                    sink.emit_text("\n").await;
                    Ok(())
                }
                None => Err(CalcError::EmptyStack),
            },
            Operator::Peek => match self.stack.peek() {
                Ok(value) => {
                    sink.emit_text("# ").await;
                    send_integer(sink, value).await;
                    sink.emit_text("\n").await;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Operator::List => self.dump(sink).await,
        };
        match result {
            Ok(()) => {
                sink.emit_text(success_echo(op)).await;
                info!("{:?} | depth {}", op, self.stack.depth());
                Ok(())
            }
            Err(e) => Err(self.report(e, sink).await),
        }
    }

    async fn dump<S: KeystrokeSink>(&self, sink: &mut S) -> Result<(), CalcError> {
        if self.stack.is_empty() {
            return Err(CalcError::EmptyStack);
        }
        sink.emit_text("#   begin stack dump\n").await;
        for value in self.stack.list() {
            sink.emit_text("# ").await;
            send_integer(sink, value).await;
            sink.emit_text("\n").await;
        }
        sink.emit_text("#   end stack dump\n").await;
        Ok(())
    }

    async fn report<S: KeystrokeSink>(&self, error: CalcError, sink: &mut S) -> CalcError {
        warn!("{:?} | depth {}", error, self.stack.depth());
        sink.emit_text("# ").await;
        sink.emit_text(error.message()).await;
        if let Some(op) = error.operator() {
            sink.emit_text(" ").await;
            sink.emit_text(op.symbol()).await;
        }
        sink.emit_text("\n").await;
        error
    }
}
