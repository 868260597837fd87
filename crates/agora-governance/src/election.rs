//! Chairman elections.

use agora_types::{Address, Timestamp};

use crate::action::{GovernanceAction, ProposalAction};
use crate::dao::Dao;
use crate::error::GovernanceError;

impl Dao {
    /// Open a proposal that makes `candidate` chairman if it passes.
    pub fn start_election(
        &mut self,
        caller: Address,
        candidate: Address,
        duration: Timestamp,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        self.access.require_officer(caller)?;
        if candidate.is_zero() {
            return Err(GovernanceError::InvalidProposal("zero candidate".to_string()));
        }

        let action = ProposalAction::Internal(GovernanceAction::SetChairman(candidate));
        self.submit(caller, format!("Elect {} as chairman", candidate), duration, action, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GovernanceParams;
    use crate::proposal::ProposalStatus;
    use crate::testing::MockHost;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    #[test]
    fn test_election_installs_chairman() {
        let mut dao = Dao::new(addr(9), addr(1), GovernanceParams::default()).unwrap();
        let mut host = MockHost::new(addr(9)).with_stake(addr(2), 10);

        let id = dao.start_election(addr(1), addr(5), 0, 0).unwrap();
        let proposal = dao.get_proposal(id).unwrap();
        assert_eq!(proposal.action.target(dao.address()), addr(9));
        let end = proposal.debate_end_time;

        dao.vote(&mut host, addr(2), id, 10, true, 1).unwrap();
        assert_eq!(dao.finish_proposal(&mut host, addr(2), id, end), Ok(ProposalStatus::Passed));
        assert_eq!(dao.chairman(), addr(5));

        // The new chairman can run the next election
        assert!(dao.start_election(addr(5), addr(6), 0, end).is_ok());
    }

    #[test]
    fn test_election_requires_officer() {
        let mut dao = Dao::new(addr(9), addr(1), GovernanceParams::default()).unwrap();
        assert_eq!(
            dao.start_election(addr(2), addr(2), 0, 0),
            Err(GovernanceError::Unauthorized(addr(2)))
        );
        assert!(dao.start_election(addr(1), Address::ZERO, 0, 0).is_err());
    }

    #[test]
    fn test_rejected_election_keeps_chairman() {
        let mut dao = Dao::new(addr(9), addr(1), GovernanceParams::default()).unwrap();
        let mut host = MockHost::new(addr(9))
            .with_stake(addr(2), 10)
            .with_stake(addr(3), 20);

        let id = dao.start_election(addr(1), addr(5), 0, 0).unwrap();
        let end = dao.get_proposal(id).unwrap().debate_end_time;
        dao.vote(&mut host, addr(2), id, 10, true, 1).unwrap();
        dao.vote(&mut host, addr(3), id, 20, false, 1).unwrap();

        assert_eq!(dao.finish_proposal(&mut host, addr(2), id, end), Ok(ProposalStatus::Rejected));
        assert_eq!(dao.chairman(), addr(1));
    }
}
