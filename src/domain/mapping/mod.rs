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

//! Option to template parameter mapping

pub mod field_map;
pub mod mapper;

pub use self::field_map::{FieldKind, FieldMap, FieldSpec};
pub use self::mapper::{ParameterList, ParameterMapper, ParameterValue, TemplateParameter};
