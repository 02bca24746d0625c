//! Ownership of the two prescale channels and the alarm.
//!
//! Every slot holds at most one client. The driver clears the interrupt
//! enable of a source before its slot changes, so the dispatcher never sees a
//! half-written slot.

use crate::dispatch::InterruptCause;
use crate::prescale::Channel;
use crate::Error;
use core::cell::Cell;

/// Receiver of RTC events, invoked from interrupt context.
///
/// Clients are identified by address when detaching, so a client should not
/// be a zero-sized type.
pub trait RtcClient {
    fn fired(&self);
}

type Slot<'a> = Cell<Option<&'a dyn RtcClient>>;

fn same_client(a: &dyn RtcClient, b: &dyn RtcClient) -> bool {
    core::ptr::addr_eq(a, b)
}

pub struct Registry<'a> {
    channels: [Slot<'a>; 2],
    alarm: Slot<'a>,
}

impl<'a> Registry<'a> {
    pub const fn new() -> Self {
        Self {
            channels: [Cell::new(None), Cell::new(None)],
            alarm: Cell::new(None),
        }
    }

    pub fn channel(&self, channel: Channel) -> Option<&'a dyn RtcClient> {
        self.channels[channel.index()].get()
    }

    pub fn alarm(&self) -> Option<&'a dyn RtcClient> {
        self.alarm.get()
    }

    pub fn client_for(&self, cause: InterruptCause) -> Option<&'a dyn RtcClient> {
        match cause {
            InterruptCause::Alarm => self.alarm(),
            InterruptCause::Channel0 => self.channel(Channel::Channel0),
            InterruptCause::Channel1 => self.channel(Channel::Channel1),
        }
    }

    pub fn claim_channel(&self, channel: Channel, client: &'a dyn RtcClient) -> Result<(), Error> {
        claim(&self.channels[channel.index()], client)
    }

    /// Channel holding `client`, RT0PS searched first.
    pub fn find(&self, client: &dyn RtcClient) -> Option<Channel> {
        Channel::ALL.iter().copied().find(|channel| {
            self.channel(*channel)
                .map_or(false, |owner| same_client(owner, client))
        })
    }

    pub fn release_channel(&self, channel: Channel) -> Result<(), Error> {
        release(&self.channels[channel.index()])
    }

    pub fn claim_alarm(&self, client: &'a dyn RtcClient) -> Result<(), Error> {
        claim(&self.alarm, client)
    }

    pub fn release_alarm(&self) -> Result<(), Error> {
        release(&self.alarm)
    }
}

impl<'a> Default for Registry<'a> {
    fn default() -> Self {
        Self::new()
    }
}

fn claim<'a>(slot: &Slot<'a>, client: &'a dyn RtcClient) -> Result<(), Error> {
    if slot.get().is_some() {
        return Err(Error::AlreadyOwned);
    }
    slot.set(Some(client));
    Ok(())
}

fn release(slot: &Slot<'_>) -> Result<(), Error> {
    slot.take().map(|_| ()).ok_or(Error::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        hits: Cell<u32>,
    }

    impl Probe {
        fn new() -> Self {
            Self { hits: Cell::new(0) }
        }
    }

    impl RtcClient for Probe {
        fn fired(&self) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    #[test]
    fn channel_holds_one_client() {
        let (a, b) = (Probe::new(), Probe::new());
        let registry = Registry::new();
        assert_eq!(registry.claim_channel(Channel::Channel1, &a), Ok(()));
        assert_eq!(
            registry.claim_channel(Channel::Channel1, &b),
            Err(Error::AlreadyOwned)
        );
        assert_eq!(registry.claim_channel(Channel::Channel0, &b), Ok(()));
        assert_eq!(registry.find(&a), Some(Channel::Channel1));
        assert_eq!(registry.find(&b), Some(Channel::Channel0));
    }

    #[test]
    fn release_frees_the_slot() {
        let a = Probe::new();
        let registry = Registry::new();
        assert_eq!(registry.release_channel(Channel::Channel0), Err(Error::NotFound));
        registry.claim_channel(Channel::Channel0, &a).unwrap();
        assert_eq!(registry.release_channel(Channel::Channel0), Ok(()));
        assert!(registry.channel(Channel::Channel0).is_none());
        assert_eq!(registry.find(&a), None);
        assert_eq!(registry.claim_channel(Channel::Channel0, &a), Ok(()));
    }

    #[test]
    fn alarm_slot_is_exclusive() {
        let (a, b) = (Probe::new(), Probe::new());
        let registry = Registry::new();
        assert_eq!(registry.release_alarm(), Err(Error::NotFound));
        registry.claim_alarm(&a).unwrap();
        assert_eq!(registry.claim_alarm(&b), Err(Error::AlreadyOwned));
        registry.release_alarm().unwrap();
        assert_eq!(registry.claim_alarm(&b), Ok(()));
    }

    #[test]
    fn causes_map_to_slots() {
        let (a, b, c) = (Probe::new(), Probe::new(), Probe::new());
        let registry = Registry::new();
        assert!(registry.client_for(InterruptCause::Alarm).is_none());
        registry.claim_alarm(&a).unwrap();
        registry.claim_channel(Channel::Channel0, &b).unwrap();
        registry.claim_channel(Channel::Channel1, &c).unwrap();

        registry.client_for(InterruptCause::Channel0).unwrap().fired();
        registry.client_for(InterruptCause::Channel1).unwrap().fired();
        registry.client_for(InterruptCause::Channel1).unwrap().fired();
        assert_eq!(a.hits.get(), 0);
        assert_eq!(b.hits.get(), 1);
        assert_eq!(c.hits.get(), 2);
    }
}
