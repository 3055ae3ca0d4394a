//! Component classification and the per-type color palette.
//!
//! The keyword table is an ordered slice, not a map: table position is the
//! tie-break when several types match, so lookup order has to be part of the
//! data. Classification is pure and case-insensitive; the same input string
//! always produces the same type and colors.

use crate::element::ShapeKind;
use crate::graph::Layer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    LoadBalancer,
    Gateway,
    Cdn,
    Dns,
    Cache,
    Database,
    RelationalDb,
    DocumentDb,
    GraphDb,
    ColumnarDb,
    ObjectStorage,
    ColdStorage,
    StackStorage,
    MessageQueue,
    Pipeline,
    AuthIam,
    Monitoring,
    Container,
    Function,
    WebApplication,
    Mobile,
    Server,
    ApplicationServer,
    MultiInstance,
    Cloud,
    Service,
}

/// Evaluated top to bottom; the first type with a matching keyword wins.
/// Specific infrastructure roles come before the generic server buckets so
/// that e.g. "API Gateway" lands on `Gateway` rather than a server type.
const KEYWORD_TABLE: &[(ComponentType, &[&str])] = &[
    (
        ComponentType::LoadBalancer,
        &["load", "balancer", "lb", "elb", "alb", "nlb", "nginx"],
    ),
    (ComponentType::Gateway, &["gateway", "kong", "apigee"]),
    (
        ComponentType::Cdn,
        &["cdn", "cloudfront", "akamai", "fastly", "edge"],
    ),
    (ComponentType::Dns, &["dns", "route53", "domain", "nameserver"]),
    (
        ComponentType::Cache,
        &["cache", "redis", "memcached", "elasticache"],
    ),
    (
        ComponentType::Database,
        &["database", "db", "sql", "postgres", "mysql", "postgresql", "mariadb"],
    ),
    (ComponentType::RelationalDb, &["relational", "rdbms"]),
    (
        ComponentType::DocumentDb,
        &["document", "mongodb", "mongo", "nosql", "firestore"],
    ),
    (ComponentType::GraphDb, &["neo4j", "graphdb", "neptune"]),
    (
        ComponentType::ColumnarDb,
        &["columnar", "cassandra", "hbase", "clickhouse"],
    ),
    (
        ComponentType::ObjectStorage,
        &["s3", "blob", "storage", "minio", "gcs", "bucket"],
    ),
    (
        ComponentType::ColdStorage,
        &["cold", "archive", "glacier", "backup"],
    ),
    (ComponentType::StackStorage, &["stack", "buffer"]),
    (
        ComponentType::MessageQueue,
        &["queue", "message", "mq", "sqs", "rabbitmq", "kafka", "pubsub"],
    ),
    (
        ComponentType::Pipeline,
        &["pipeline", "etl", "stream", "kinesis", "dataflow"],
    ),
    (
        ComponentType::AuthIam,
        &["auth", "iam", "identity", "oauth", "cognito", "keycloak"],
    ),
    (
        ComponentType::Monitoring,
        &["monitoring", "metrics", "prometheus", "grafana", "datadog"],
    ),
    (
        ComponentType::Container,
        &["container", "docker", "kubernetes", "k8s", "pod"],
    ),
    (
        ComponentType::Function,
        &["function", "lambda", "serverless", "faas"],
    ),
    (
        ComponentType::WebApplication,
        &["web", "frontend", "webapp", "browser", "react", "vue"],
    ),
    (ComponentType::Mobile, &["mobile", "ios", "android", "phone"]),
    (
        ComponentType::Server,
        &["server", "instance", "vm", "ec2", "compute"],
    ),
    (
        ComponentType::ApplicationServer,
        &["app", "application", "backend", "api"],
    ),
    (
        ComponentType::MultiInstance,
        &["multi", "cluster", "replicated", "scaled"],
    ),
    (ComponentType::Cloud, &["cloud", "aws", "gcp", "azure", "provider"]),
];

impl ComponentType {
    /// `{stroke, fill}` pair of the pro palette.
    pub fn palette(self) -> (&'static str, &'static str) {
        match self {
            Self::Database => ("#7c3aed", "#ede9fe"),
            Self::RelationalDb => ("#6d28d9", "#ddd6fe"),
            Self::DocumentDb => ("#8b5cf6", "#e0e7ff"),
            Self::GraphDb => ("#a78bfa", "#f3e8ff"),
            Self::ColumnarDb => ("#7c3aed", "#ede9fe"),
            Self::Cache => ("#dc2626", "#fee2e2"),
            Self::ObjectStorage => ("#d97706", "#fef3c7"),
            Self::ColdStorage => ("#92400e", "#fde68a"),
            Self::StackStorage => ("#b45309", "#fef3c7"),
            Self::Server => ("#2563eb", "#dbeafe"),
            Self::ApplicationServer => ("#1d4ed8", "#bfdbfe"),
            Self::MultiInstance => ("#3b82f6", "#93c5fd"),
            Self::LoadBalancer => ("#0891b2", "#cffafe"),
            Self::Cdn => ("#06b6d4", "#e0f2fe"),
            Self::Dns => ("#0284c7", "#bae6fd"),
            Self::MessageQueue => ("#16a34a", "#dcfce7"),
            Self::Pipeline => ("#15803d", "#bbf7d0"),
            Self::AuthIam => ("#e11d48", "#ffe4e6"),
            Self::Cloud => ("#0ea5e9", "#e0f2fe"),
            Self::WebApplication => ("#4f46e5", "#e0e7ff"),
            Self::Mobile => ("#6366f1", "#eef2ff"),
            Self::Gateway => ("#475569", "#f1f5f9"),
            Self::Container => ("#0284c7", "#bae6fd"),
            Self::Function => ("#f59e0b", "#fef3c7"),
            Self::Monitoring => ("#84cc16", "#ecfccb"),
            Self::Service => ("#64748b", "#f1f5f9"),
        }
    }

    /// Preferred shape family: ellipses for data stores and caches,
    /// rectangles for everything else. The architecture layout further
    /// promotes caches to diamonds.
    pub fn preferred_shape(self) -> ShapeKind {
        match self {
            Self::Database
            | Self::RelationalDb
            | Self::DocumentDb
            | Self::GraphDb
            | Self::ColumnarDb
            | Self::Cache
            | Self::ObjectStorage
            | Self::ColdStorage
            | Self::StackStorage => ShapeKind::Ellipse,
            _ => ShapeKind::Rectangle,
        }
    }

    /// Layer bucket used when the input carries no declared layer.
    pub fn layer(self) -> Layer {
        match self {
            Self::WebApplication | Self::Mobile => Layer::Client,
            Self::Cdn | Self::Dns => Layer::Edge,
            Self::LoadBalancer => Layer::LoadBalancer,
            Self::Gateway => Layer::Gateway,
            Self::Cache => Layer::Cache,
            Self::MessageQueue | Self::Pipeline => Layer::Queue,
            Self::Database
            | Self::RelationalDb
            | Self::DocumentDb
            | Self::GraphDb
            | Self::ColumnarDb => Layer::Database,
            Self::ObjectStorage | Self::ColdStorage | Self::StackStorage => Layer::Storage,
            Self::AuthIam => Layer::Auth,
            Self::Monitoring => Layer::Monitoring,
            Self::Server
            | Self::ApplicationServer
            | Self::MultiInstance
            | Self::Container
            | Self::Function
            | Self::Cloud
            | Self::Service => Layer::Service,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadBalancer => "load_balancer",
            Self::Gateway => "gateway",
            Self::Cdn => "cdn",
            Self::Dns => "dns",
            Self::Cache => "cache",
            Self::Database => "database",
            Self::RelationalDb => "relational_db",
            Self::DocumentDb => "document_db",
            Self::GraphDb => "graph_db",
            Self::ColumnarDb => "columnar_db",
            Self::ObjectStorage => "object_storage",
            Self::ColdStorage => "cold_storage",
            Self::StackStorage => "stack_storage",
            Self::MessageQueue => "message_queue",
            Self::Pipeline => "pipeline",
            Self::AuthIam => "auth_iam",
            Self::Monitoring => "monitoring",
            Self::Container => "container",
            Self::Function => "function",
            Self::WebApplication => "web_application",
            Self::Mobile => "mobile",
            Self::Server => "server",
            Self::ApplicationServer => "application_server",
            Self::MultiInstance => "multi_instance",
            Self::Cloud => "cloud",
            Self::Service => "service",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub component: ComponentType,
    pub stroke: &'static str,
    pub fill: &'static str,
    pub shape: ShapeKind,
}

impl Classification {
    fn of(component: ComponentType) -> Self {
        let (stroke, fill) = component.palette();
        Self {
            component,
            stroke,
            fill,
            shape: component.preferred_shape(),
        }
    }
}

/// Classify a component name or kind hint into a semantic type.
///
/// Tokenizes on non-alphanumeric characters and tests each token against the
/// keyword table in order. No match falls back to the generic service type.
pub fn classify(text: &str) -> Classification {
    let lowered = text.to_ascii_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect();

    for (component, keywords) in KEYWORD_TABLE {
        if keywords
            .iter()
            .any(|keyword| tokens.iter().any(|token| token == keyword))
        {
            return Classification::of(*component);
        }
    }
    Classification::of(ComponentType::Service)
}
