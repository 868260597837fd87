//! Proposal resolution and dispatch.

use agora_types::amount::ratio;
use agora_types::{Address, Amount, Timestamp};
use tracing::{info, warn};

use crate::action::{GovernanceAction, ProposalAction};
use crate::dao::Dao;
use crate::error::GovernanceError;
use crate::host::ExecutionHost;
use crate::params::check_minimum_quorum;
use crate::proposal::ProposalStatus;

/// Share of `total_staked` that voted, at `SCALE`.
pub fn quorum_ratio(total_votes: Amount, total_staked: Amount) -> Amount {
    ratio(total_votes, total_staked)
}

impl Dao {
    /// Resolve proposal `id` once its debate is over.
    ///
    /// The outcome is committed before anything is dispatched: a quorum
    /// shortfall or a failed dispatch still leaves the proposal finalized.
    pub fn finish_proposal<H: ExecutionHost + ?Sized>(
        &mut self,
        host: &mut H,
        caller: Address,
        id: u64,
        now: Timestamp,
    ) -> Result<ProposalStatus, GovernanceError> {
        let required = self.params.minimum_quorum;
        let total_staked = host.total_staked();

        let proposal = self.proposals.get_mut(id)?;
        proposal.ensure_finishable(now)?;

        let actual = quorum_ratio(proposal.total_votes(), total_staked);
        if actual < required {
            proposal.finalize(ProposalStatus::QuorumFailed);
            warn!(id, actual, required, total_staked, "Proposal failed quorum");
            return Err(GovernanceError::MinimalVotingQuorum { actual, required });
        }

        if !proposal.has_majority() {
            proposal.finalize(ProposalStatus::Rejected);
            info!(
                id,
                for_votes = proposal.for_votes,
                against_votes = proposal.against_votes,
                "Proposal rejected"
            );
            return Ok(ProposalStatus::Rejected);
        }

        proposal.finalize(ProposalStatus::Passed);
        let action = proposal.action.clone();
        info!(id, finisher = %caller, "Proposal passed");

        if let Err(e) = self.dispatch(host, action, now) {
            warn!(id, error = %e, "Proposal dispatch failed");
            let reason = match e {
                GovernanceError::ExecutionFailed(reason) => reason,
                other => other.to_string(),
            };
            return Err(GovernanceError::ExecutionFailed(reason));
        }
        Ok(ProposalStatus::Passed)
    }

    fn dispatch<H: ExecutionHost + ?Sized>(
        &mut self,
        host: &mut H,
        action: ProposalAction,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let governance = self.address();
        match action {
            ProposalAction::Internal(action) => self.apply(host, governance, action),
            ProposalAction::External { target, call_data } => {
                info!(target = %target, "Dispatching proposal call");
                host.call(governance, target, &call_data, now)
                    .map_err(GovernanceError::ExecutionFailed)
            }
        }
    }

    /// Run a governance action on behalf of `caller`.
    pub fn apply<H: ExecutionHost + ?Sized>(
        &mut self,
        host: &mut H,
        caller: Address,
        action: GovernanceAction,
    ) -> Result<(), GovernanceError> {
        match action {
            GovernanceAction::SetChairman(candidate) => self.change_chairman(caller, candidate),
            GovernanceAction::SetMinimumQuorum(q) => self.set_minimum_quorum(caller, q),
            GovernanceAction::SetMinimumDuration(d) => self.set_minimum_duration(caller, d),
            GovernanceAction::BuyBackAndBurn => self.buy_back_and_burn(host, caller).map(|_| ()),
        }
    }

    pub fn change_chairman(&mut self, caller: Address, chairman: Address) -> Result<(), GovernanceError> {
        self.access.set_chairman(caller, chairman)?;
        info!(chairman = %chairman, "Chairman changed");
        Ok(())
    }

    pub fn set_minimum_quorum(&mut self, caller: Address, minimum_quorum: Amount) -> Result<(), GovernanceError> {
        self.access.require_officer_or_self(caller)?;
        check_minimum_quorum(minimum_quorum)?;
        self.params.minimum_quorum = minimum_quorum;
        info!(minimum_quorum, "Minimum quorum changed");
        Ok(())
    }

    pub fn set_minimum_duration(&mut self, caller: Address, minimum_duration: Timestamp) -> Result<(), GovernanceError> {
        self.access.require_officer_or_self(caller)?;
        self.params.minimum_duration = minimum_duration;
        info!(minimum_duration, "Minimum duration changed");
        Ok(())
    }

    /// Swap the whole native balance for the governed token and burn it.
    pub fn buy_back_and_burn<H: ExecutionHost + ?Sized>(
        &mut self,
        host: &mut H,
        caller: Address,
    ) -> Result<Amount, GovernanceError> {
        self.access.require_self(caller)?;
        let native = self.native_balance;
        if native == 0 {
            return Err(GovernanceError::ExecutionFailed("no native balance".to_string()));
        }

        let burned = host
            .buy_back_and_burn(caller, native)
            .map_err(GovernanceError::ExecutionFailed)?;
        self.native_balance = 0;

        info!(native, burned, "Bought back and burned");
        Ok(burned)
    }
}
