use crate::availability::{CalendarDay, Slots, Status};
use crate::form::{Reservation, ReservationForm, ValidationErrors};
use tracing::{debug, info};

/// Receives each completed reservation exactly once
pub(crate) trait ReservationSink {
    fn accept(&mut self, reservation: &Reservation);
}

/// Sink that only records the reservation in the log
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct LogSink;

impl ReservationSink for LogSink {
    fn accept(&mut self, reservation: &Reservation) {
        info!(
            date = %reservation.date,
            name = %reservation.name,
            email = %reservation.email,
            phone = %reservation.phone,
            "reservation submitted"
        );
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    Idle,
    Collecting(ReservationForm),
}

/// Owns the availability slots and decides when the reservation form may be
/// shown
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Controller<K> {
    slots: Slots,
    phase: Phase,
    sink: K,
}

impl<K: ReservationSink> Controller<K> {
    pub(crate) fn new(slots: Slots, sink: K) -> Controller<K> {
        Controller {
            slots,
            phase: Phase::Idle,
            sink,
        }
    }

    pub(crate) fn slots(&self) -> &Slots {
        &self.slots
    }

    pub(crate) fn form_mut(&mut self) -> Option<&mut ReservationForm> {
        match &mut self.phase {
            Phase::Collecting(form) => Some(form),
            Phase::Idle => None,
        }
    }

    pub(crate) fn is_collecting(&self) -> bool {
        matches!(self.phase, Phase::Collecting(_))
    }

    /// Opens the form for `day` if the day is available.  Returns `false` if
    /// the selection was ignored.
    pub(crate) fn on_day_selected<D: CalendarDay>(&mut self, day: &D) -> bool {
        let date = day.calendar_day();
        if self.is_collecting() {
            debug!(%date, "selection ignored while the form is open");
            return false;
        }
        match self.slots.lookup(&date) {
            Ok(Status::Available) => {
                debug!(%date, "opening reservation form");
                self.phase = Phase::Collecting(ReservationForm::new(date));
                true
            }
            Ok(Status::Unavailable) => {
                debug!(%date, "selected day is unavailable");
                false
            }
            Err(e) => {
                debug!(
                    year = self.slots.year(),
                    month = %self.slots.month(),
                    "selected day is outside the calendar: {e}"
                );
                false
            }
        }
    }

    /// Validates the open form and, if it passes, completes the reservation.
    /// On failure the errors are kept on the form and nothing else changes.
    pub(crate) fn submit(&mut self) -> Option<Result<Reservation, ValidationErrors>> {
        let form = self.form_mut()?;
        match form.submit() {
            Ok(reservation) => {
                self.on_reservation_submitted(&reservation);
                Some(Ok(reservation))
            }
            Err(errors) => {
                debug!(count = errors.len(), %errors, "reservation form failed validation");
                form.set_errors(&errors);
                Some(Err(errors))
            }
        }
    }

    pub(crate) fn on_reservation_submitted(&mut self, reservation: &Reservation) {
        self.slots = self.slots.mark_reserved(&reservation.date);
        self.sink.accept(reservation);
        self.phase = Phase::Idle;
    }

    pub(crate) fn cancel(&mut self) -> bool {
        if let Phase::Collecting(form) = &self.phase {
            debug!(date = %form.date(), "reservation form cancelled");
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }
}
