/// Outcome of comparing the stored origin against the page origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainGuardDecision {
    /// No origin stored yet; the shell should run the one-time setup
    /// prompt and stay inert for this page load.
    PromptForSetup,
    /// An origin is stored but it is not this one. Stay silent so the
    /// token is never sent to an unauthorized host.
    Mismatch,
    /// The stored origin matches; the rest of the module may run.
    Authorized,
}

/// Gates the module on the single authorized origin.
///
/// Comparison is exact string equality over the full origin: scheme,
/// host, and port are all significant.
pub fn evaluate_domain(stored: Option<&str>, current_origin: &str) -> DomainGuardDecision {
    match stored {
        None => DomainGuardDecision::PromptForSetup,
        Some(saved) if saved.is_empty() => DomainGuardDecision::PromptForSetup,
        Some(saved) if saved == current_origin => DomainGuardDecision::Authorized,
        Some(_) => DomainGuardDecision::Mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_domain_prompts_for_setup() {
        assert_eq!(
            evaluate_domain(None, "https://reader.example"),
            DomainGuardDecision::PromptForSetup
        );
    }

    #[test]
    fn empty_domain_prompts_for_setup() {
        assert_eq!(
            evaluate_domain(Some(""), "https://reader.example"),
            DomainGuardDecision::PromptForSetup
        );
    }

    #[test]
    fn exact_origin_match_authorizes() {
        assert_eq!(
            evaluate_domain(Some("https://reader.example"), "https://reader.example"),
            DomainGuardDecision::Authorized
        );
    }

    #[test]
    fn scheme_is_significant() {
        assert_eq!(
            evaluate_domain(Some("http://reader.example"), "https://reader.example"),
            DomainGuardDecision::Mismatch
        );
    }

    #[test]
    fn port_is_significant() {
        assert_eq!(
            evaluate_domain(Some("https://reader.example:8443"), "https://reader.example"),
            DomainGuardDecision::Mismatch
        );
    }

    #[test]
    fn case_is_significant() {
        assert_eq!(
            evaluate_domain(Some("https://Reader.example"), "https://reader.example"),
            DomainGuardDecision::Mismatch
        );
    }
}
