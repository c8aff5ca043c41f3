// Copyright 2025 Envoi Storage Team.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::{Arc, Mutex};
use storage_cfn::cli::{execute, CliArgs, Invocation};
use storage_cfn::domain::products::{hammerspace, qumulo, weka};
use storage_cfn::*;

/// Records every stack request instead of calling CloudFormation.
#[derive(Clone, Default)]
struct RecordingStackClient {
    requests: Arc<Mutex<Vec<StackRequest>>>,
}

#[async_trait::async_trait]
impl StackClient for RecordingStackClient {
    async fn create_stack(&self, request: &StackRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(format!(
            "arn:aws:cloudformation:us-east-1:123456789012:stack/{}/0001",
            request.stack_name
        ))
    }
}

#[derive(Default)]
struct RecordingFactory {
    client: RecordingStackClient,
    targets: Mutex<Vec<AwsTarget>>,
    weka_base_url: Option<String>,
}

#[async_trait::async_trait]
impl ClientFactory for RecordingFactory {
    async fn stack_client(&self, target: &AwsTarget) -> Result<Box<dyn StackClient>> {
        self.targets.lock().unwrap().push(target.clone());
        Ok(Box::new(self.client.clone()))
    }

    fn template_api(&self, token: &str) -> Result<Box<dyn TemplateApi>> {
        let base_url = self
            .weka_base_url
            .clone()
            .ok_or_else(|| StackError::config_error("template API not available in this test"))?;
        Ok(Box::new(WekaApiClient::with_base_url(token, &base_url)?))
    }
}

impl RecordingFactory {
    fn requests(&self) -> Vec<StackRequest> {
        self.client.requests.lock().unwrap().clone()
    }
}

fn invocation(argv: &[&str]) -> Invocation {
    use clap::Parser;
    let mut full = vec!["storage-cfn"];
    full.extend_from_slice(argv);
    CliArgs::parse_from(full).command.into_invocation().unwrap()
}

#[test]
fn test_builtin_field_maps_are_valid() {
    assert_eq!(hammerspace::field_map().unwrap().len(), 13);
    assert_eq!(qumulo::field_map().unwrap().len(), 36);
    assert_eq!(qumulo::legacy_field_map().unwrap().len(), 8);
    assert_eq!(weka::field_map().unwrap().len(), 3);
}

#[test]
fn test_qumulo_legacy_mapping() {
    let options = OptionSet::new()
        .with("vpc_id", "vpc-1")
        .with("subnet_id", "subnet-1")
        .with("key_pair_name", "kp")
        .with("cluster_name", "c1");

    let parameters = ParameterMapper::map(&options, &qumulo::legacy_field_map().unwrap());
    assert_eq!(
        parameters.to_pairs(),
        vec![
            ("ClusterName".to_string(), "c1".to_string()),
            ("KeyName".to_string(), "kp".to_string()),
            ("VpcId".to_string(), "vpc-1".to_string()),
            ("SubnetId".to_string(), "subnet-1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_required_only_options_submit() {
    let factory = RecordingFactory::default();
    let client = factory.client.clone();
    let map = qumulo::legacy_field_map().unwrap();
    let options = OptionSet::new()
        .with("vpc_id", "vpc-1")
        .with("subnet_id", "subnet-1")
        .with("key_pair_name", "kp")
        .with("cluster_name", "c1");

    let stack_id = StackRequestBuilder::new()
        .stack_name("Qumulo")
        .template_url("https://example.com/qumulo.json")
        .parameters(ParameterMapper::map(&options, &map))
        .require(map.required_keys())
        .submit(&client)
        .await
        .unwrap();

    assert!(stack_id.ends_with("stack/Qumulo/0001"));
    let requests = factory.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].parameters.keys(),
        vec!["ClusterName", "KeyName", "VpcId", "SubnetId"]
    );
}

#[tokio::test]
async fn test_qumulo_legacy_dispatch_applies_defaults() {
    let registry = CommandRegistry::builtin().unwrap();
    let factory = RecordingFactory::default();
    let invocation = invocation(&[
        "qumulo",
        "aws",
        "create-cluster-legacy",
        "--cluster-name",
        "c1",
        "--key-pair-name",
        "kp",
        "--vpc-id",
        "vpc-1",
        "--subnet-id",
        "subnet-1",
        "--aws-region",
        "us-west-2",
    ]);

    let output = execute(&registry, &factory, &invocation).await.unwrap();
    match output {
        CommandOutput::StackCreated { stack_name, stack_id } => {
            assert_eq!(stack_name, "Qumulo");
            assert!(stack_id.contains("stack/Qumulo"));
        }
        other => panic!("Expected stack creation, got {:?}", other),
    }

    let requests = factory.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.template_url,
        "https://envoi-prod-files-public.s3.amazonaws.com/qumulo/cloud-formation/templates/qumulo.cfn-template.json"
    );
    assert_eq!(request.capabilities, vec![Capability::Iam]);
    assert_eq!(request.role_arn, None);
    assert_eq!(
        request.parameters.keys(),
        vec![
            "ClusterName",
            "InstanceType",
            "KeyName",
            "VpcId",
            "SubnetId",
            "SgCidr",
            "VolumesEncryptionKey"
        ]
    );
    assert_eq!(
        request.parameters.get("VolumesEncryptionKey"),
        Some(&ParameterValue::Scalar(String::new()))
    );
    assert_eq!(
        *factory.targets.lock().unwrap(),
        vec![AwsTarget {
            region: Some("us-west-2".to_string()),
            profile: None,
        }]
    );
}

#[tokio::test]
async fn test_missing_template_url_makes_no_call() {
    let registry = CommandRegistry::builtin().unwrap();
    let factory = RecordingFactory::default();
    let invocation = invocation(&[
        "weka",
        "aws",
        "create-stack",
        "--key-name",
        "kp",
        "--subnet-id",
        "subnet-1",
        "--vpc-id",
        "vpc-1",
    ]);

    let err = registry
        .dispatch(
            invocation.command,
            &invocation.options,
            &ExecutionContext {
                factory: &factory,
                dry_run: false,
            },
        )
        .await
        .unwrap_err();

    assert!(err.is_config_error());
    assert!(err.to_string().contains("template_url"));
    assert!(factory.targets.lock().unwrap().is_empty());
    assert!(factory.requests().is_empty());
}

#[tokio::test]
async fn test_missing_required_parameters_reported() {
    let registry = CommandRegistry::builtin().unwrap();
    let factory = RecordingFactory::default();
    let invocation = invocation(&["qumulo", "aws", "create-cluster", "--vpc-id", "vpc-1"]);

    let err = execute(&registry, &factory, &invocation).await.unwrap_err();
    match err.downcast_ref::<StackError>() {
        Some(StackError::MissingParameters(keys)) => {
            assert!(keys.contains(&"QClusterAdminPwd".to_string()));
            assert!(!keys.contains(&"VPCId".to_string()));
        }
        other => panic!("Expected `MissingParameters` error, got {:?}", other),
    }
    assert!(factory.requests().is_empty());
}

#[tokio::test]
async fn test_dry_run_masks_and_skips_submission() {
    let registry = CommandRegistry::builtin().unwrap();
    let factory = RecordingFactory::default();
    let invocation = invocation(&[
        "qumulo",
        "aws",
        "create-cluster",
        "--qs-s3-bucket-name",
        "bucket",
        "--qs-s3-key-prefix",
        "prefix/",
        "--qs-s3-region",
        "us-east-1",
        "--key-pair-name",
        "kp",
        "--env-type",
        "prod",
        "--vpc-id",
        "vpc-1",
        "--private-subnet-id",
        "subnet-1",
        "--q-cluster-name",
        "c1",
        "--q-cluster-admin-pwd",
        "s3cret!",
        "--q-nlb-private-subnet-ids",
        "subnet-a, subnet-b",
        "--dry-run",
    ]);

    let output = execute(&registry, &factory, &invocation).await.unwrap();
    match output {
        CommandOutput::DryRun { request, masked_keys } => {
            assert_eq!(masked_keys, vec!["QClusterAdminPwd".to_string()]);
            assert_eq!(
                request.parameters.get("QNlbPrivateSubnetIDs"),
                Some(&ParameterValue::List(vec![
                    "subnet-a".to_string(),
                    "subnet-b".to_string()
                ]))
            );
            assert_eq!(
                request.parameters.get("QNodeCount"),
                Some(&ParameterValue::Scalar("4".to_string()))
            );
            assert!(!request.parameters.contains_key("PublicSubnetID"));
        }
        other => panic!("Expected dry run output, got {:?}", other),
    }
    assert!(factory.targets.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_params_file_and_overrides() {
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hammerspace.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "cluster_vpc_id: vpc-file").unwrap();
    writeln!(file, "dsx_node_instance_count: 4").unwrap();
    writeln!(file, "stack_name: hs-file").unwrap();

    let registry = CommandRegistry::builtin().unwrap();
    let factory = RecordingFactory::default();
    let invocation = invocation(&[
        "hammerspace",
        "aws",
        "create-cluster",
        "--params-file",
        path.to_str().unwrap(),
        "--dsx-node-instance-count",
        "6",
        "-D",
        "stack_name=hs-override",
        "--cfn-role-arn",
        "arn:aws:iam::123456789012:role/cfn",
    ]);

    execute(&registry, &factory, &invocation).await.unwrap();

    let requests = factory.requests();
    let request = &requests[0];
    assert_eq!(request.stack_name, "hs-override");
    assert_eq!(
        request.role_arn.as_deref(),
        Some("arn:aws:iam::123456789012:role/cfn")
    );
    assert_eq!(
        request.parameters.get("VpcId"),
        Some(&ParameterValue::Scalar("vpc-file".to_string()))
    );
    assert_eq!(
        request.parameters.get("DsxInstanceCount"),
        Some(&ParameterValue::Scalar("6".to_string()))
    );
    assert_eq!(request.parameters.keys()[0], "AnvilConfiguration");
}

#[tokio::test]
async fn test_unknown_command() {
    let registry = CommandRegistry::builtin().unwrap();
    let factory = RecordingFactory::default();
    let err = registry
        .dispatch(
            "ceph aws create-cluster",
            &OptionSet::new(),
            &ExecutionContext {
                factory: &factory,
                dry_run: false,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StackError::UnknownCommand(_)));
}

#[tokio::test]
async fn test_weka_create_cluster_generates_then_submits() {
    use httpmock::prelude::*;

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dist/v1/release");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"objects":[{"id":"4.2.7"}]}"#);
        })
        .await;
    let generate = server
        .mock_async(|when, then| {
            when.method(POST).path("/dist/v1/aws/cfn/4.2.7").json_body(serde_json::json!({
                "cluster": [
                    {"role": "client", "instance_type": "c5n.2xlarge", "count": 2},
                    {"role": "backend", "instance_type": "i3en.2xlarge", "count": 6}
                ]
            }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"url":"https://weka-cfn.example.com/4.2.7.json"}"#);
        })
        .await;

    let registry = CommandRegistry::builtin().unwrap();
    let factory = RecordingFactory {
        weka_base_url: Some(server.url("/dist/v1")),
        ..Default::default()
    };
    let invocation = invocation(&[
        "weka",
        "aws",
        "create-cluster",
        "--token",
        "abc",
        "--client-instance-type",
        "c5n.2xlarge",
        "--client-instance-count",
        "2",
        "--key-name",
        "kp",
        "--subnet-id",
        "subnet-1",
        "--vpc-id",
        "vpc-1",
    ]);

    execute(&registry, &factory, &invocation).await.unwrap();
    generate.assert_async().await;

    let requests = factory.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].stack_name, "Weka");
    assert_eq!(requests[0].template_url, "https://weka-cfn.example.com/4.2.7.json");
    assert_eq!(requests[0].parameters.keys(), vec!["KeyName", "SubnetId", "VpcId"]);
}

#[tokio::test]
async fn test_weka_create_template_dry_run_needs_no_token() {
    let registry = CommandRegistry::builtin().unwrap();
    let factory = RecordingFactory::default();
    let invocation = invocation(&["weka", "aws", "create-template", "--dry-run"]);

    match execute(&registry, &factory, &invocation).await.unwrap() {
        CommandOutput::TemplatePlan { version, request } => {
            assert_eq!(version, "latest");
            assert_eq!(request.cluster.len(), 1);
            assert_eq!(request.cluster[0].count, 6);
        }
        other => panic!("Expected template plan, got {:?}", other),
    }
}
