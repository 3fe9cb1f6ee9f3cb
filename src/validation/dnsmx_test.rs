#[cfg(test)]
mod dnsmx_additional_tests {
    use crate::error::DnsError;
    use crate::validation::dnsmx::*;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;
    use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};

    /// Resolver pointed at a local port where no nameserver listens
    fn unreachable_resolver(timeout: Duration) -> DnsResolver {
        let nameservers =
            NameServerConfigGroup::from_ips_clear(&[IpAddr::V4(Ipv4Addr::LOCALHOST)], 9, true);
        let config = ResolverConfig::from_parts(None, vec![], nameservers);
        DnsResolver::with_config(config, ResolverOpts::default(), timeout)
    }

    #[test]
    fn test_explicit_config_uses_mx_tier() {
        let resolver = unreachable_resolver(Duration::from_secs(1));
        assert_eq!(resolver.tier(), Tier::MxQuery);
    }

    #[tokio::test]
    async fn test_unreachable_nameserver_is_inconclusive() {
        let resolver = unreachable_resolver(Duration::from_millis(400));

        let verdict = resolver.has_mail_exchanger("example.com").await;
        assert!(
            matches!(verdict, Err(DnsError::Timeout(_)) | Err(DnsError::Unavailable(_))),
            "expected an infrastructural failure, got {verdict:?}"
        );
    }

    #[tokio::test]
    async fn test_unreachable_nameserver_records_fail() {
        let resolver = unreachable_resolver(Duration::from_millis(400));
        assert!(resolver.mx_records("example.com").await.is_err());
    }

    #[tokio::test]
    async fn test_lookup_is_bounded_by_timeout() {
        let resolver = unreachable_resolver(Duration::from_millis(300));

        let started = std::time::Instant::now();
        let _ = resolver.has_mail_exchanger("example.com").await;
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_host_lookup_resolves_localhost() {
        let resolver = DnsResolver::host_lookup(Duration::from_secs(2));
        assert_eq!(resolver.has_mail_exchanger("localhost").await, Ok(true));
    }

    #[tokio::test]
    async fn test_host_lookup_unknown_domain_is_not_positive() {
        let resolver = DnsResolver::host_lookup(Duration::from_secs(2));

        // Depending on the environment this is a negative answer or a timeout,
        // never a positive one
        let verdict = resolver
            .has_mail_exchanger("nonexistent-domain-12345.invalid")
            .await;
        assert_ne!(verdict, Ok(true));
    }

    #[tokio::test]
    async fn test_default_resolver_rejects_reserved_domain() {
        let resolver = default_resolver(Duration::from_millis(500));

        // `.invalid` never resolves; offline this is an error rather than a negative
        let verdict = resolver.has_mail_exchanger("example.invalid").await;
        assert_ne!(verdict, Ok(true));
    }
}
