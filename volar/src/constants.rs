// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

// Env values used by the client.
pub const VOLAR_API_KEY: &str = "VOLAR_API_KEY";
pub const VOLAR_SECRET: &str = "VOLAR_SECRET";
pub const VOLAR_BASE_URL: &str = "VOLAR_BASE_URL";
pub const VOLAR_SECURE: &str = "VOLAR_SECURE";
pub const VOLAR_S3_REGION: &str = "VOLAR_S3_REGION";
pub const VOLAR_S3_ENDPOINT: &str = "VOLAR_S3_ENDPOINT";
pub const VOLAR_UPLOAD_TIMEOUT: &str = "VOLAR_UPLOAD_TIMEOUT";

// Parameters reserved by the transport.
pub const API_KEY: &str = "api_key";
pub const SIGNATURE: &str = "signature";
