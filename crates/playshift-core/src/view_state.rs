//! Remote-data state held by every view controller.
//!
//! A `ViewState<T>` only moves through [`FetchEvent`]s. Each `Started` hands
//! out a [`Ticket`]; completions carrying an older ticket are dropped, so a
//! response that was overtaken by a newer fetch never overwrites fresher data.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent<T> {
    Started,
    Succeeded(Ticket, T),
    Failed(Ticket, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    data: T,
    loading: bool,
    error: Option<String>,
    generation: u64,
    loaded_once: bool,
}

impl<T: Default> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
            generation: 0,
            loaded_once: false,
        }
    }
}

impl<T> ViewState<T> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True once any fetch completed successfully.
    pub fn has_loaded(&self) -> bool {
        self.loaded_once
    }

    /// Ticket of the most recent `Started`.
    pub fn current_ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    /// Begin a fetch. Returns the next state and the ticket to attach to the
    /// completion event.
    pub fn start(self) -> (Self, Ticket) {
        let next = self.apply(FetchEvent::Started);
        let ticket = next.current_ticket();
        (next, ticket)
    }

    pub fn apply(self, event: FetchEvent<T>) -> Self {
        match event {
            FetchEvent::Started => Self {
                loading: true,
                error: None,
                generation: self.generation + 1,
                ..self
            },
            FetchEvent::Succeeded(ticket, data) if ticket == self.current_ticket() => Self {
                data,
                loading: false,
                error: None,
                loaded_once: true,
                ..self
            },
            FetchEvent::Failed(ticket, message) if ticket == self.current_ticket() => Self {
                loading: false,
                error: Some(message),
                ..self
            },
            // Superseded by a newer fetch.
            FetchEvent::Succeeded(..) | FetchEvent::Failed(..) => self,
        }
    }

    /// Clear a surfaced error without touching the data.
    pub fn dismiss_error(self) -> Self {
        Self { error: None, ..self }
    }
}

impl<T: Default> ViewState<T> {
    /// `start` for a state stored in a field.
    pub fn begin(slot: &mut Self) -> Ticket {
        let (next, ticket) = std::mem::take(slot).start();
        *slot = next;
        ticket
    }

    /// `apply` for a state stored in a field.
    pub fn step(slot: &mut Self, event: FetchEvent<T>) {
        *slot = std::mem::take(slot).apply(event);
    }
}
