//! The PromQL query catalog.
//!
//! Each function substitutes its parameters into a fixed query template and
//! returns the query string; nothing here touches the network or any shared
//! state. Per-namespace variants take the namespace explicitly; fleet-wide
//! variants aggregate by namespace instead.

/// Ingress request rate for one namespace, summed by service.
#[must_use]
pub fn ingress_requests_by_service(namespace: &str) -> String {
    format!(
        r#"sum(
  rate(
    nginx_ingress_controller_requests{{
      namespace="{namespace}"
    }}[5m]
  )
) by (service)"#
    )
}

/// Fleet-wide ingress request rate, summed by namespace and service.
#[must_use]
pub fn ingress_requests_by_namespace_service() -> String {
    r"sum(
  rate(nginx_ingress_controller_requests[5m])
) by (namespace, service)"
        .to_string()
}

/// CPU utilization (usage over quota) for one namespace, by container.
#[must_use]
pub fn cpu_utilization_by_container(namespace: &str) -> String {
    format!(
        r#"sum(
  rate(
    container_cpu_usage_seconds_total{{
      namespace="{namespace}",
      image!="",
      container_name!="POD"
    }}[5m]
  )
) by (container_name)

/

sum(
  container_spec_cpu_quota{{
    namespace="{namespace}",
    image!="",
    container_name!="POD"
  }}

  /

  container_spec_cpu_period{{
    namespace="{namespace}",
    image!="",
    container_name!="POD"
  }}
) by (container_name)"#
    )
}

/// Fleet-wide CPU utilization, by namespace and container.
#[must_use]
pub fn cpu_utilization_by_namespace_container() -> String {
    r#"sum(
  rate(
    container_cpu_usage_seconds_total{
      image!="",
      container_name!="POD"
    }[5m]
  )
) by (namespace, container_name)

/

sum(
  container_spec_cpu_quota{
    image!="",
    container_name!="POD"
  }

  /

  container_spec_cpu_period{
    image!="",
    container_name!="POD"
  }
) by (namespace, container_name)"#
        .to_string()
}

/// Cumulative CPU seconds for one namespace, by container.
#[must_use]
pub fn cpu_seconds_by_container(namespace: &str) -> String {
    format!(
        r#"sum(
    container_cpu_usage_seconds_total{{
      image!="",
      namespace="{namespace}",
      container_name!="POD"
    }}
) by (container_name)"#
    )
}

/// Container memory usage for one namespace, by container.
#[must_use]
pub fn memory_usage_by_container(namespace: &str) -> String {
    format!(
        r#"sum by(container) (
    container_memory_usage_bytes{{
        job="kubelet",
        namespace="{namespace}",
        container!="POD",
        container!=""
    }}
)"#
    )
}
